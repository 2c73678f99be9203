// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use beckon_prompt::{Code, InputKind, Prompt, PromptController, PromptService, PromptStyle, Stage};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

const DEVICES: [InputKind; 3] = [InputKind::Keyboard, InputKind::Gamepad, InputKind::Touch];

fn setup(hold: f64) -> (Stage, PromptService, Prompt, PromptController) {
    let stage = Stage::new();
    let service = PromptService::new();
    let prompt = Prompt::new("Bench");
    prompt.set_style(PromptStyle::Custom);
    prompt.set_action_text("Open");
    prompt.set_object_text("Heavy door");
    prompt.set_keyboard_key(Code::KeyE);
    prompt.set_hold_duration(hold);
    let controller = PromptController::new(prompt.clone(), &service, &stage);
    (stage, service, prompt, controller)
}

fn bench_show_hide(c: &mut Criterion) {
    let (stage, service, prompt, controller) = setup(0.5);
    c.bench_function("show_hide_device_switch", |b| {
        b.iter(|| {
            for input in DEVICES {
                service.show(&prompt, input);
                service.hide(&prompt);
                stage.advance(0.25);
            }
            black_box(controller.session());
        });
    });
}

fn bench_hold_frames(c: &mut Criterion) {
    c.bench_function("hold_sixty_frames", |b| {
        b.iter_batched(
            || {
                let fixture = setup(1.0);
                fixture.1.show(&fixture.2, InputKind::Keyboard);
                fixture
            },
            |(stage, _service, prompt, controller)| {
                prompt.begin_hold();
                for _ in 0..60 {
                    stage.advance(1.0 / 60.0);
                }
                prompt.end_hold();
                black_box(controller.phase());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_relayout(c: &mut Criterion) {
    let (_stage, service, prompt, controller) = setup(0.0);
    service.show(&prompt, InputKind::Keyboard);
    let texts = ["Open", "Open the heavy door", "Inspect", ""];
    c.bench_function("relayout_on_text_change", |b| {
        b.iter(|| {
            for text in texts {
                prompt.set_action_text(text);
            }
            black_box(controller.layout());
        });
    });
}

criterion_group!(benches, bench_show_hide, bench_hold_frames, bench_relayout);
criterion_main!(benches);
