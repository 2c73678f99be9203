// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The long-lived node hierarchy of a prompt.
//!
//! ```text
//! Billboard "Prompt"
//! └── Frame (panel)
//!     ├── Frame "InputFrame"
//!     │   └── Frame (indicator, scaled while holding)
//!     │       └── Frame "RoundFrame"
//!     ├── Text "ActionText"
//!     └── Text "ObjectText"
//! ```
//!
//! The circular progress indicator is built here too, detached; the device factory hangs it
//! under the indicator when the prompt has a hold duration.

use alloc::string::String;

use beckon_tree::{
    NodeFlags, NodeId, NodeKind, Property, Props, SizeConstraint, TextAlign, Tree, UDim, UDim2,
    Value,
};
use kurbo::Vec2;

use crate::animation::{Animation, AnimationGroups, Group};
use crate::theme::Theme;

/// Image of one half of the radial fill.
pub const RADIAL_FILL_IMAGE: &str = "glyphs/progress/radial_fill.png";

/// Ids of the static nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisualTree {
    /// Top-level container placed in the scene layer.
    pub billboard: NodeId,
    /// Rounded background panel.
    pub panel: NodeId,
    /// Square region left of the labels.
    pub input_frame: NodeId,
    /// Resizable frame inside the input region; glyphs hang from it.
    pub indicator: NodeId,
    /// Ring behind the glyph.
    pub round_frame: NodeId,
    /// Action label.
    pub action_label: NodeId,
    /// Object label.
    pub object_label: NodeId,
    /// Circular progress indicator.
    pub progress: CircularProgress,
}

/// Ids of the circular progress indicator.
///
/// Each half is a clipping frame holding a radial fill image; `progress` on [`bar`](Self::bar)
/// drives the rotation of both fills.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CircularProgress {
    /// Root of the indicator; owns the progress value.
    pub bar: NodeId,
    /// Left clipping half.
    pub left: NodeId,
    /// Right clipping half.
    pub right: NodeId,
    /// Left fill, rotated through `[180, 360]` degrees.
    pub left_fill: NodeId,
    /// Right fill, rotated through `[0, 180]` degrees.
    pub right_fill: NodeId,
}

fn centered(name: &str, size: UDim2) -> Props {
    Props {
        name: String::from(name),
        size,
        position: UDim2::from_scale(0.5, 0.5),
        anchor_point: Vec2::new(0.5, 0.5),
        background_transparency: 1.0,
        ..Props::default()
    }
}

fn label(name: &str, size: f64, color: [f32; 3], theme: &Theme) -> Props {
    Props {
        name: String::from(name),
        size: UDim2::from_scale(1.0, 1.0),
        font: theme.font,
        text_size: size,
        text_color: color,
        text_align: TextAlign::Left,
        background_transparency: 1.0,
        text_transparency: 1.0,
        ..Props::default()
    }
}

impl CircularProgress {
    /// Build a detached indicator.
    pub fn build(tree: &mut Tree, theme: &Theme) -> Self {
        let bar = tree.insert(
            None,
            NodeKind::Frame,
            centered(
                "CircularProgressBar",
                UDim2::from_offset(theme.progress_size, theme.progress_size),
            ),
        );
        let (left, left_fill) = half(tree, bar, true);
        let (right, right_fill) = half(tree, bar, false);
        tree.bind_rotation(bar, left_fill, 180.0, 360.0);
        tree.bind_rotation(bar, right_fill, 0.0, 180.0);
        Self {
            bar,
            left,
            right,
            left_fill,
            right_fill,
        }
    }
}

fn half(tree: &mut Tree, bar: NodeId, left_side: bool) -> (NodeId, NodeId) {
    let clip = tree.insert(
        Some(bar),
        NodeKind::Frame,
        Props {
            name: String::from(if left_side { "LeftHalf" } else { "RightHalf" }),
            size: UDim2::from_scale(0.5, 1.0),
            position: UDim2::from_scale(if left_side { 0.0 } else { 0.5 }, 0.0),
            background_transparency: 1.0,
            flags: NodeFlags::VISIBLE | NodeFlags::CLIPS_DESCENDANTS,
            ..Props::default()
        },
    );
    let fill = tree.insert(
        Some(clip),
        NodeKind::Image,
        Props {
            name: String::from("RadialFill"),
            size: UDim2::from_scale(2.0, 1.0),
            position: UDim2::from_scale(if left_side { 0.0 } else { -1.0 }, 0.0),
            background_transparency: 1.0,
            image: Some(String::from(RADIAL_FILL_IMAGE)),
            ..Props::default()
        },
    );
    (clip, fill)
}

impl VisualTree {
    /// Build the static hierarchy, detached from the scene, and register its members of
    /// every animation group.
    pub fn build(tree: &mut Tree, theme: &Theme, groups: &mut AnimationGroups) -> Self {
        let billboard = tree.insert(
            None,
            NodeKind::Billboard,
            Props {
                name: String::from("Prompt"),
                flags: NodeFlags::VISIBLE | NodeFlags::ALWAYS_ON_TOP,
                ..Props::default()
            },
        );
        let panel = tree.insert(
            Some(billboard),
            NodeKind::Frame,
            Props {
                name: String::from("Panel"),
                size: UDim2::from_scale(0.5, 1.0),
                background_color: theme.panel_color,
                background_transparency: 1.0,
                corner_radius: Some(UDim::new(0.0, 8.0)),
                ..Props::default()
            },
        );
        let input_frame = tree.insert(
            Some(panel),
            NodeKind::Frame,
            Props {
                name: String::from("InputFrame"),
                size: UDim2::from_scale(1.0, 1.0),
                size_constraint: SizeConstraint::RelativeYY,
                background_transparency: 1.0,
                ..Props::default()
            },
        );
        let indicator = tree.insert(
            Some(input_frame),
            NodeKind::Frame,
            centered("Indicator", UDim2::from_scale(1.0, 1.0)),
        );
        let round_frame = tree.insert(
            Some(indicator),
            NodeKind::Frame,
            Props {
                corner_radius: Some(UDim::new(0.5, 0.0)),
                ..centered(
                    "RoundFrame",
                    UDim2::from_offset(theme.ring_size, theme.ring_size),
                )
            },
        );
        let action_label = tree.insert(
            Some(panel),
            NodeKind::Text,
            label("ActionText", theme.action_text_size, [1.0; 3], theme),
        );
        let object_label = tree.insert(
            Some(panel),
            NodeKind::Text,
            label("ObjectText", theme.object_text_size, [0.7; 3], theme),
        );
        let progress = CircularProgress::build(tree, theme);

        let visual = Self {
            billboard,
            panel,
            input_frame,
            indicator,
            round_frame,
            action_label,
            object_label,
            progress,
        };
        visual.register(theme, groups);
        visual
    }

    fn register(&self, theme: &Theme, groups: &mut AnimationGroups) {
        let text = |to: f64| [(Property::TextTransparency, Value::Scalar(to))];
        for node in [self.action_label, self.object_label] {
            groups.add_static(Group::HoldBegin, Animation::new(node, &text(1.0), theme.fast));
            groups.add_static(Group::HoldEnd, Animation::new(node, &text(0.0), theme.fast));
            groups.add_static(Group::FadeOut, Animation::new(node, &text(1.0), theme.fast));
            groups.add_static(Group::FadeIn, Animation::new(node, &text(0.0), theme.fast));
        }

        let collapsed = [
            (Property::Size, Value::Dim(UDim2::from_scale(0.5, 1.0))),
            (Property::BackgroundTransparency, Value::Scalar(1.0)),
        ];
        let expanded = [
            (Property::Size, Value::Dim(UDim2::from_scale(1.0, 1.0))),
            (
                Property::BackgroundTransparency,
                Value::Scalar(theme.panel_transparency),
            ),
        ];
        for (group, targets) in [
            (Group::HoldBegin, &collapsed),
            (Group::HoldEnd, &expanded),
            (Group::FadeOut, &collapsed),
            (Group::FadeIn, &expanded),
        ] {
            groups.add_static(group, Animation::new(self.panel, targets, theme.fast));
        }

        let ring = |to: f64| [(Property::BackgroundTransparency, Value::Scalar(to))];
        groups.add_static(
            Group::FadeOut,
            Animation::new(self.round_frame, &ring(1.0), theme.quick),
        );
        groups.add_static(
            Group::FadeIn,
            Animation::new(
                self.round_frame,
                &ring(theme.ring_transparency),
                theme.quick,
            ),
        );
    }

    /// Subtree roots to remove on teardown. The progress bar is listed on its own because it
    /// may be detached.
    pub fn roots(&self) -> [NodeId; 2] {
        [self.billboard, self.progress.bar]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_is_wired() {
        let mut tree = Tree::new();
        let mut groups = AnimationGroups::new();
        let v = VisualTree::build(&mut tree, &Theme::default(), &mut groups);

        assert_eq!(tree.parent(v.billboard), None);
        assert_eq!(tree.find_child(v.billboard, "Panel"), Some(v.panel));
        assert_eq!(tree.find_child(v.panel, "InputFrame"), Some(v.input_frame));
        assert_eq!(tree.find_child(v.panel, "ActionText"), Some(v.action_label));
        assert_eq!(tree.find_child(v.panel, "ObjectText"), Some(v.object_label));
        assert!(tree.is_descendant_of(v.round_frame, v.indicator));
        assert_eq!(tree.parent(v.progress.bar), None, "progress starts detached");
        assert!(
            tree.props(v.billboard)
                .is_some_and(|p| p.flags.contains(NodeFlags::ALWAYS_ON_TOP))
        );
    }

    #[test]
    fn labels_start_invisible() {
        let mut tree = Tree::new();
        let mut groups = AnimationGroups::new();
        let v = VisualTree::build(&mut tree, &Theme::default(), &mut groups);
        for label in [v.action_label, v.object_label] {
            assert_eq!(
                tree.value(label, Property::TextTransparency),
                Some(Value::Scalar(1.0))
            );
        }
    }

    #[test]
    fn static_group_members() {
        let mut tree = Tree::new();
        let mut groups = AnimationGroups::new();
        VisualTree::build(&mut tree, &Theme::default(), &mut groups);
        // Two labels and the panel; the ring only fades.
        assert_eq!(groups.len(Group::HoldBegin), 3);
        assert_eq!(groups.len(Group::HoldEnd), 3);
        assert_eq!(groups.len(Group::FadeOut), 4);
        assert_eq!(groups.len(Group::FadeIn), 4);
    }

    #[test]
    fn progress_drives_both_halves() {
        let mut tree = Tree::new();
        let p = CircularProgress::build(&mut tree, &Theme::default());
        let rotation = |tree: &Tree, n| tree.value(n, Property::Rotation);

        assert_eq!(rotation(&tree, p.left_fill), Some(Value::Scalar(180.0)));
        assert_eq!(rotation(&tree, p.right_fill), Some(Value::Scalar(0.0)));

        tree.set_value(p.bar, Property::Progress, Value::Scalar(0.25));
        assert_eq!(rotation(&tree, p.left_fill), Some(Value::Scalar(180.0)));
        assert_eq!(rotation(&tree, p.right_fill), Some(Value::Scalar(90.0)));

        tree.set_value(p.bar, Property::Progress, Value::Scalar(0.75));
        assert_eq!(rotation(&tree, p.left_fill), Some(Value::Scalar(270.0)));
        assert_eq!(rotation(&tree, p.right_fill), Some(Value::Scalar(180.0)));
    }
}
