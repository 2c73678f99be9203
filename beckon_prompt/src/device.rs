// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-specific visuals.
//!
//! The nodes that depend on the input device are reusable *slots*: they are created once,
//! detached while unused, and reattached (with fresh properties) when a rebuild needs them.
//! A rebuild first detaches every slot and drops the dynamic members of every animation
//! group, then attaches only what the resolved [`Glyph`] and the prompt's settings call for.

use alloc::string::String;

use beckon_tree::{NodeFlags, NodeId, NodeKind, Property, Props, TextAlign, Tree, UDim2, Value};
use kurbo::Vec2;

use crate::animation::{Animation, AnimationGroups, Group};
use crate::glyph::{Glyph, KEY_BACKDROP_IMAGE};
use crate::keys::InputKind;
use crate::theme::Theme;
use crate::visual::VisualTree;

/// Ids of the reusable device-specific nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slots {
    /// Gamepad button image.
    pub gamepad_icon: NodeId,
    /// Touch tap image, or the key backdrop for keyboards.
    pub backdrop: NodeId,
    /// Keyboard key image drawn on the backdrop.
    pub key_icon: NodeId,
    /// Keyboard key text drawn on the backdrop.
    pub key_text: NodeId,
    /// Invisible full-size button forwarding pointer input.
    pub overlay: NodeId,
}

/// What a rebuild is for.
#[derive(Copy, Clone, Debug)]
pub struct Device<'a> {
    /// Active input device.
    pub input: InputKind,
    /// Resolved glyph for `input`.
    pub glyph: &'a Glyph,
    /// Prompt hold duration in seconds.
    pub hold_duration: f64,
    /// Whether the prompt accepts pointer clicks.
    pub clickable: bool,
}

/// Optional pieces attached by a rebuild.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Attached {
    /// The pointer overlay is attached and the billboard accepts input.
    pub overlay: bool,
    /// The circular progress indicator is attached.
    pub progress: bool,
}

fn glyph_props(name: &str) -> Props {
    Props {
        name: String::from(name),
        position: UDim2::from_scale(0.5, 0.5),
        anchor_point: Vec2::new(0.5, 0.5),
        background_transparency: 1.0,
        image_transparency: 1.0,
        ..Props::default()
    }
}

impl Slots {
    /// Create every slot, detached.
    pub fn build(tree: &mut Tree, theme: &Theme) -> Self {
        let gamepad_icon = tree.insert(
            None,
            NodeKind::Image,
            Props {
                size: UDim2::from_offset(24.0, 24.0),
                ..glyph_props("ButtonImage")
            },
        );
        let backdrop = tree.insert(None, NodeKind::Image, glyph_props("ButtonImage"));
        let key_icon = tree.insert(
            None,
            NodeKind::Image,
            Props {
                size: UDim2::from_offset(36.0, 36.0),
                ..glyph_props("ButtonImage")
            },
        );
        let key_text = tree.insert(
            None,
            NodeKind::Text,
            Props {
                name: String::from("ButtonText"),
                size: UDim2::from_scale(1.0, 1.0),
                position: UDim2::from_offset(0.0, -1.0),
                font: theme.font,
                text_color: [1.0; 3],
                text_align: TextAlign::Center,
                background_transparency: 1.0,
                text_transparency: 1.0,
                ..Props::default()
            },
        );
        let overlay = tree.insert(
            None,
            NodeKind::Button,
            Props {
                name: String::from("Overlay"),
                size: UDim2::from_scale(1.0, 1.0),
                background_transparency: 1.0,
                text_transparency: 1.0,
                flags: NodeFlags::VISIBLE | NodeFlags::ACTIVE,
                ..Props::default()
            },
        );
        Self {
            gamepad_icon,
            backdrop,
            key_icon,
            key_text,
            overlay,
        }
    }

    /// Every slot.
    pub fn all(&self) -> [NodeId; 5] {
        [
            self.gamepad_icon,
            self.backdrop,
            self.key_icon,
            self.key_text,
            self.overlay,
        ]
    }

    /// Slots that draw a glyph.
    pub fn glyphs(&self) -> [NodeId; 4] {
        [self.gamepad_icon, self.backdrop, self.key_icon, self.key_text]
    }
}

/// Replace the device-specific nodes and animation members for `device`.
pub fn rebuild(
    tree: &mut Tree,
    visual: &VisualTree,
    slots: &Slots,
    groups: &mut AnimationGroups,
    theme: &Theme,
    device: &Device<'_>,
) -> Attached {
    for slot in slots.all() {
        tree.reparent(slot, None);
    }
    tree.reparent(visual.progress.bar, None);
    if let Some(p) = tree.props_mut(visual.billboard) {
        p.flags.remove(NodeFlags::ACTIVE);
    }
    groups.clear_dynamic();

    let fade_image = |groups: &mut AnimationGroups, node| {
        let to = |v: f64| [(Property::ImageTransparency, Value::Scalar(v))];
        groups.add_dynamic(Group::FadeOut, Animation::new(node, &to(1.0), theme.quick));
        groups.add_dynamic(Group::FadeIn, Animation::new(node, &to(0.0), theme.quick));
    };
    let show_image = |tree: &mut Tree, node, image: &str, size: Option<UDim2>| {
        if let Some(p) = tree.props_mut(node) {
            p.image = Some(String::from(image));
            p.image_transparency = 1.0;
            if let Some(size) = size {
                p.size = size;
            }
        }
        tree.reparent(node, Some(visual.indicator));
    };

    match device.glyph {
        Glyph::Gamepad { image } => {
            show_image(tree, slots.gamepad_icon, *image, None);
            fade_image(groups, slots.gamepad_icon);
        }
        Glyph::GamepadUnmapped => {}
        Glyph::Touch { image } => {
            show_image(
                tree,
                slots.backdrop,
                *image,
                Some(UDim2::from_offset(25.0, 31.0)),
            );
            fade_image(groups, slots.backdrop);
        }
        Glyph::KeyImage { image } => {
            show_key_backdrop(tree, slots, &show_image);
            fade_image(groups, slots.backdrop);
            show_image(tree, slots.key_icon, *image, None);
            fade_image(groups, slots.key_icon);
        }
        Glyph::KeyText { text } => {
            show_key_backdrop(tree, slots, &show_image);
            fade_image(groups, slots.backdrop);
            let size = if text.chars().count() > 2 {
                theme.key_text_size_long
            } else {
                theme.key_text_size
            };
            if let Some(p) = tree.props_mut(slots.key_text) {
                p.text.clone_from(text);
                p.text_size = size;
                p.text_transparency = 1.0;
            }
            tree.reparent(slots.key_text, Some(visual.indicator));
            let to = |v: f64| [(Property::TextTransparency, Value::Scalar(v))];
            groups.add_dynamic(
                Group::FadeOut,
                Animation::new(slots.key_text, &to(1.0), theme.quick),
            );
            groups.add_dynamic(
                Group::FadeIn,
                Animation::new(slots.key_text, &to(0.0), theme.quick),
            );
        }
    }

    let hold_scale = if device.input == InputKind::Touch {
        theme.touch_hold_scale
    } else {
        theme.hold_scale
    };
    tree.set_value(visual.indicator, Property::Scale, Value::Scalar(1.0));
    let scale = |v: f64| [(Property::Scale, Value::Scalar(v))];
    groups.add_dynamic(
        Group::HoldBegin,
        Animation::new(visual.indicator, &scale(hold_scale), theme.fast),
    );
    groups.add_dynamic(
        Group::HoldEnd,
        Animation::new(visual.indicator, &scale(1.0), theme.fast),
    );

    let mut attached = Attached::default();
    if device.input == InputKind::Touch || device.clickable {
        tree.reparent(slots.overlay, Some(visual.billboard));
        if let Some(p) = tree.props_mut(visual.billboard) {
            p.flags.insert(NodeFlags::ACTIVE);
        }
        attached.overlay = true;
    }

    if device.hold_duration > 0.0 {
        let bar = visual.progress.bar;
        tree.set_value(bar, Property::Progress, Value::Scalar(0.0));
        tree.reparent(bar, Some(visual.indicator));
        let progress = |v: f64| [(Property::Progress, Value::Scalar(v))];
        groups.add_dynamic(Group::HoldBegin, Animation::over_hold(bar, &progress(1.0)));
        groups.add_dynamic(
            Group::HoldEnd,
            Animation::new(bar, &progress(0.0), theme.progress_reset),
        );
        attached.progress = true;
    }

    tracing::trace!(
        input = ?device.input,
        glyph = ?device.glyph,
        overlay = attached.overlay,
        progress = attached.progress,
        "rebuilt device visuals"
    );
    attached
}

fn show_key_backdrop(
    tree: &mut Tree,
    slots: &Slots,
    show_image: &impl Fn(&mut Tree, NodeId, &str, Option<UDim2>),
) {
    show_image(
        tree,
        slots.backdrop,
        KEY_BACKDROP_IMAGE,
        Some(UDim2::from_offset(28.0, 30.0)),
    );
}
