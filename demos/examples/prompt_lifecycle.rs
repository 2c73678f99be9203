// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prompt lifecycle.
//!
//! Show a hold-to-open prompt, hold it to completion, release, and hide it, printing the
//! scene after each step.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p beckon_demos --example prompt_lifecycle`

use beckon_prompt::{InputKind, Prompt, PromptController, PromptService, PromptStyle, Stage};
use beckon_tree::{Adornee, NodeId, Property, Tree};
use kurbo::Vec2;

fn dump(tree: &Tree, node: NodeId, depth: usize) {
    let Some(props) = tree.props(node) else {
        return;
    };
    let kind = tree.kind(node).map(|k| format!("{k:?}")).unwrap_or_default();
    let mut line = format!("{:indent$}{kind} {:?}", "", props.name, indent = depth * 2);
    if !props.text.is_empty() {
        line.push_str(&format!(" text={:?} tt={:.2}", props.text, props.text_transparency));
    }
    if let Some(image) = &props.image {
        line.push_str(&format!(" image={image} it={:.2}", props.image_transparency));
    }
    println!("{line}");
    for child in tree.children(node) {
        dump(tree, *child, depth + 1);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let stage = Stage::new();
    let service = PromptService::new();

    let prompt = Prompt::new("TreasureChest");
    prompt.set_style(PromptStyle::Custom);
    prompt.set_action_text("Open");
    prompt.set_object_text("Treasure chest");
    prompt.set_hold_duration(1.0);
    prompt.set_ui_offset(Vec2::new(0.0, -24.0));
    prompt.set_parent(Some(Adornee(7)));

    let controller = PromptController::new(prompt.clone(), &service, &stage);

    println!("== shown (keyboard)");
    service.show(&prompt, InputKind::Keyboard);
    stage.advance(0.3);
    let layer = stage.layer();
    stage.with(|s| dump(&s.tree, layer, 0));
    if let Some(layout) = controller.layout() {
        println!("layout: {:?} offset={:?}", layout.size, layout.size_offset);
    }

    println!("== holding");
    prompt.begin_hold();
    let bar = controller.nodes().visual.progress.bar;
    for _ in 0..4 {
        stage.advance(0.25);
        let progress = stage.with(|s| s.tree.value(bar, Property::Progress));
        println!("phase={:?} progress={progress:?}", controller.phase());
    }

    println!("== hold complete, released");
    prompt.complete_hold();
    stage.advance(0.3);
    prompt.end_hold();
    stage.advance(0.6);
    stage.with(|s| dump(&s.tree, layer, 0));

    println!("== hidden");
    service.hide(&prompt);
    stage.advance(0.3);
    println!("phase={:?}", controller.phase());
    stage.with(|s| dump(&s.tree, layer, 0));

    controller.destroy();
    println!("destroyed, {} node(s) left", stage.with(|s| s.tree.len()));
}
