// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation groups: named sets of property tweens played together.
//!
//! ## Layers
//!
//! Each group has a *static* layer, filled once when the prompt's long-lived nodes are
//! built, and a *dynamic* layer, refilled every time the device-specific nodes are rebuilt.
//! Clearing the dynamic layer never touches static entries.
//!
//! ## Playback
//!
//! Playing a group submits every member to the [`Tweener`] at once. Members have independent
//! timing curves and no ordering between them.

use alloc::vec::Vec;

use beckon_tree::{NodeId, Property, Tree, TweenInfo, Tweener, Value};

/// The four coordinated groups of a prompt.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Group {
    /// User started holding the button.
    HoldBegin,
    /// User released the button before the hold completed.
    HoldEnd,
    /// Prompt hides, or confirms activation.
    FadeOut,
    /// Prompt shows, or recovers from activation.
    FadeIn,
}

impl Group {
    /// All groups.
    pub const ALL: [Self; 4] = [Self::HoldBegin, Self::HoldEnd, Self::FadeOut, Self::FadeIn];

    const fn index(self) -> usize {
        match self {
            Self::HoldBegin => 0,
            Self::HoldEnd => 1,
            Self::FadeOut => 2,
            Self::FadeIn => 3,
        }
    }
}

/// Timing of a group member.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Timing {
    /// A fixed curve.
    Fixed(TweenInfo),
    /// The prompt's hold curve, resolved when the group is played.
    Hold,
}

/// One member of a group: a node, its target property values, and a timing curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// Animated node.
    pub node: NodeId,
    /// Target values.
    pub targets: Vec<(Property, Value)>,
    /// Timing curve.
    pub timing: Timing,
}

impl Animation {
    /// Animate `node` toward `targets` with a fixed curve.
    pub fn new(node: NodeId, targets: &[(Property, Value)], info: TweenInfo) -> Self {
        Self {
            node,
            targets: targets.to_vec(),
            timing: Timing::Fixed(info),
        }
    }

    /// Animate `node` toward `targets` over the prompt's hold duration.
    pub fn over_hold(node: NodeId, targets: &[(Property, Value)]) -> Self {
        Self {
            node,
            targets: targets.to_vec(),
            timing: Timing::Hold,
        }
    }
}

/// Static and dynamic members of the four groups.
#[derive(Clone, Debug, Default)]
pub struct AnimationGroups {
    fixed: [Vec<Animation>; 4],
    dynamic: [Vec<Animation>; 4],
}

impl AnimationGroups {
    /// Create empty groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member that lives as long as the groups.
    pub fn add_static(&mut self, group: Group, animation: Animation) {
        self.fixed[group.index()].push(animation);
    }

    /// Append a member that is dropped by the next [`clear_dynamic`](Self::clear_dynamic).
    pub fn add_dynamic(&mut self, group: Group, animation: Animation) {
        self.dynamic[group.index()].push(animation);
    }

    /// Drop every dynamic member of every group.
    pub fn clear_dynamic(&mut self) {
        for members in &mut self.dynamic {
            members.clear();
        }
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.clear_dynamic();
        for members in &mut self.fixed {
            members.clear();
        }
    }

    /// Members of `group`: static ones first, then dynamic ones.
    pub fn members(&self, group: Group) -> impl Iterator<Item = &Animation> + '_ {
        let i = group.index();
        self.fixed[i].iter().chain(self.dynamic[i].iter())
    }

    /// Number of members in `group`.
    pub fn len(&self, group: Group) -> usize {
        let i = group.index();
        self.fixed[i].len() + self.dynamic[i].len()
    }

    /// Returns true if no group has members.
    pub fn is_empty(&self) -> bool {
        Group::ALL.iter().all(|g| self.len(*g) == 0)
    }

    /// Submit every member of `group`. [`Timing::Hold`] members use `hold`.
    pub fn play(&self, group: Group, tree: &mut Tree, tweens: &mut Tweener, hold: TweenInfo) {
        for animation in self.members(group) {
            let info = match animation.timing {
                Timing::Fixed(info) => info,
                Timing::Hold => hold,
            };
            tweens.play(tree, animation.node, &animation.targets, info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beckon_tree::{NodeKind, Props};

    fn fade(node: NodeId, to: f64) -> Animation {
        Animation::new(
            node,
            &[(Property::TextTransparency, Value::Scalar(to))],
            TweenInfo::linear(0.1),
        )
    }

    #[test]
    fn rebuilding_dynamic_layer_keeps_static_members() {
        let mut tree = Tree::new();
        let label = tree.insert(None, NodeKind::Text, Props::default());
        let glyph = tree.insert(None, NodeKind::Image, Props::default());
        let mut groups = AnimationGroups::new();
        groups.add_static(Group::FadeOut, fade(label, 1.0));

        for _ in 0..3 {
            groups.clear_dynamic();
            groups.add_dynamic(Group::FadeOut, fade(glyph, 1.0));
        }
        assert_eq!(groups.len(Group::FadeOut), 2, "no duplicates after rebuilds");
        let nodes: Vec<NodeId> = groups.members(Group::FadeOut).map(|a| a.node).collect();
        assert_eq!(nodes, [label, glyph]);
    }

    #[test]
    fn hold_timing_is_resolved_at_play_time() {
        let mut tree = Tree::new();
        let bar = tree.insert(None, NodeKind::Frame, Props::default());
        let mut groups = AnimationGroups::new();
        groups.add_dynamic(
            Group::HoldBegin,
            Animation::over_hold(bar, &[(Property::Progress, Value::Scalar(1.0))]),
        );
        let mut tweens = Tweener::new();
        groups.play(
            Group::HoldBegin,
            &mut tree,
            &mut tweens,
            TweenInfo::linear(4.0),
        );
        tweens.advance(&mut tree, 1.0);
        assert_eq!(
            tree.value(bar, Property::Progress),
            Some(Value::Scalar(0.25))
        );
    }

    #[test]
    fn clear_drops_everything() {
        let mut tree = Tree::new();
        let label = tree.insert(None, NodeKind::Text, Props::default());
        let mut groups = AnimationGroups::new();
        for g in Group::ALL {
            groups.add_static(g, fade(label, 0.0));
            groups.add_dynamic(g, fade(label, 1.0));
        }
        assert!(!groups.is_empty());
        groups.clear();
        assert!(groups.is_empty());
    }
}
