// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use beckon_prompt::glyph::{Binding, resolve};
use beckon_prompt::{Code, GamepadButton, InputKind, KeyLabeler, UsLayout};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const KEYS: [Code; 12] = [
    Code::KeyE,
    Code::KeyF,
    Code::Enter,
    Code::Tab,
    Code::Comma,
    Code::Space,
    Code::F5,
    Code::F12,
    Code::ControlLeft,
    Code::AltRight,
    Code::Digit1,
    Code::Backspace,
];

const BUTTONS: [GamepadButton; 6] = [
    GamepadButton::A,
    GamepadButton::X,
    GamepadButton::DPadUp,
    GamepadButton::L1,
    GamepadButton::R2,
    GamepadButton::Start,
];

fn bench_keyboard(c: &mut Criterion) {
    let labels: Vec<(Code, String)> = KEYS.iter().map(|k| (*k, UsLayout.label(*k))).collect();
    c.bench_function("resolve_keyboard_mixed", |b| {
        b.iter(|| {
            for (key, label) in &labels {
                let binding = Binding {
                    keyboard: *key,
                    gamepad: GamepadButton::X,
                    raw_label: label,
                };
                let _ = black_box(resolve(InputKind::Keyboard, black_box(&binding)));
            }
        });
    });
}

fn bench_gamepad(c: &mut Criterion) {
    c.bench_function("resolve_gamepad_mixed", |b| {
        b.iter(|| {
            for button in BUTTONS {
                let binding = Binding {
                    keyboard: Code::KeyE,
                    gamepad: button,
                    raw_label: "E",
                };
                let _ = black_box(resolve(InputKind::Gamepad, black_box(&binding)));
            }
        });
    });
}

criterion_group!(benches, bench_keyboard, bench_gamepad);
criterion_main!(benches);
