// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device switch.
//!
//! Re-show one prompt for each input device and print which glyph slots are attached.
//! Ends with a key that has no glyph, which is reported as a configuration defect.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p beckon_demos --example device_switch`

use beckon_prompt::{
    Code, GamepadButton, InputKind, PointerInput, PointerPhase, PointerType, Prompt,
    PromptController, PromptService, PromptStyle, Stage,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let stage = Stage::new();
    let service = PromptService::new();
    let prompt = Prompt::new("Lever");
    prompt.set_style(PromptStyle::Custom);
    prompt.set_action_text("Pull");
    prompt.set_keyboard_key(Code::F5);
    prompt.set_gamepad_key(GamepadButton::Y);
    prompt.set_clickable(false);

    let controller = PromptController::new(prompt.clone(), &service, &stage);
    let slots = controller.nodes().slots;
    let names = [
        ("gamepad_icon", slots.gamepad_icon),
        ("backdrop", slots.backdrop),
        ("key_icon", slots.key_icon),
        ("key_text", slots.key_text),
        ("overlay", slots.overlay),
    ];

    for input in [
        InputKind::Keyboard,
        InputKind::Gamepad,
        InputKind::Touch,
        InputKind::Keyboard,
    ] {
        service.show(&prompt, input);
        stage.advance(0.1);
        let attached: Vec<&str> = stage.with(|s| {
            names
                .iter()
                .filter(|(_, id)| s.tree.parent(*id).is_some())
                .map(|(name, _)| *name)
                .collect()
        });
        println!("{input:?}: session {} attached {attached:?}", controller.session());
    }

    // Touch shows the overlay; taps drive the prompt.
    service.show(&prompt, InputKind::Touch);
    let triggered = prompt.triggered().connect(|_| println!("triggered by tap"));
    controller.pointer_input(PointerInput {
        pointer: PointerType::Touch,
        phase: PointerPhase::Began,
    });
    controller.pointer_input(PointerInput {
        pointer: PointerType::Touch,
        phase: PointerPhase::Ended,
    });
    drop(triggered);

    prompt.set_keyboard_key(Code::CapsLock);
    match controller.show(InputKind::Keyboard) {
        Ok(()) => println!("unexpectedly rendered CapsLock"),
        Err(err) => println!("configuration defect: {err}"),
    }
}
