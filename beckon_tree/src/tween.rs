// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tweens: timing curves and a fire-and-forget player.
//!
//! ## Semantics
//!
//! - [`Tweener::play`] captures each track's start value from the node's current value,
//!   so replaying an animation always continues from wherever the property is now.
//! - Playing a track for a node/property pair that is already animating replaces the running track.
//! - [`Tweener::advance`] lands exactly on the target value when a track completes.
//! - Tracks whose node has been removed are dropped without error.

use alloc::vec::Vec;

use crate::tree::Tree;
use crate::types::{NodeId, Property, Value};

/// Shape of an easing curve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum EasingStyle {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic.
    Quad,
}

/// Which end of the curve the easing applies to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum EasingDirection {
    /// Slow start.
    In,
    /// Slow finish.
    #[default]
    Out,
    /// Slow start and finish.
    InOut,
}

/// Timing curve of a tween.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TweenInfo {
    /// Duration in seconds.
    pub duration: f64,
    /// Curve shape.
    pub style: EasingStyle,
    /// Curve direction.
    pub direction: EasingDirection,
}

impl TweenInfo {
    /// Create a timing curve.
    pub const fn new(duration: f64, style: EasingStyle, direction: EasingDirection) -> Self {
        Self {
            duration,
            style,
            direction,
        }
    }

    /// Linear timing over `duration` seconds.
    pub const fn linear(duration: f64) -> Self {
        Self::new(duration, EasingStyle::Linear, EasingDirection::Out)
    }
}

/// Map linear time `t` in `[0, 1]` onto the eased curve.
pub fn ease(style: EasingStyle, direction: EasingDirection, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let ease_in = |t: f64| match style {
        EasingStyle::Linear => t,
        EasingStyle::Quad => t * t,
    };
    match direction {
        EasingDirection::In => ease_in(t),
        EasingDirection::Out => 1.0 - ease_in(1.0 - t),
        EasingDirection::InOut => {
            if t < 0.5 {
                ease_in(t * 2.0) * 0.5
            } else {
                1.0 - ease_in((1.0 - t) * 2.0) * 0.5
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Track {
    node: NodeId,
    property: Property,
    from: Value,
    to: Value,
    info: TweenInfo,
    elapsed: f64,
}

/// Plays property tweens against a [`Tree`].
#[derive(Clone, Debug, Default)]
pub struct Tweener {
    tracks: Vec<Track>,
}

impl Tweener {
    /// Create an idle player.
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Start animating `node` toward every `(property, value)` target.
    ///
    /// Zero-length tweens apply their targets immediately.
    pub fn play(
        &mut self,
        tree: &mut Tree,
        node: NodeId,
        targets: &[(Property, Value)],
        info: TweenInfo,
    ) {
        for &(property, to) in targets {
            self.tracks
                .retain(|t| !(t.node == node && t.property == property));
            let Some(from) = tree.value(node, property) else {
                continue;
            };
            if info.duration <= 0.0 {
                tree.set_value(node, property, to);
                continue;
            }
            self.tracks.push(Track {
                node,
                property,
                from,
                to,
                info,
                elapsed: 0.0,
            });
        }
    }

    /// Step every running track by `dt` seconds.
    pub fn advance(&mut self, tree: &mut Tree, dt: f64) {
        self.tracks.retain_mut(|track| {
            if !tree.is_alive(track.node) {
                return false;
            }
            track.elapsed += dt;
            let t = track.elapsed / track.info.duration;
            if t >= 1.0 {
                tree.set_value(track.node, track.property, track.to);
                return false;
            }
            let eased = ease(track.info.style, track.info.direction, t);
            tree.set_value(track.node, track.property, track.from.lerp(track.to, eased));
            true
        });
    }

    /// Complete every running track immediately.
    pub fn finish(&mut self, tree: &mut Tree) {
        for track in self.tracks.drain(..) {
            tree.set_value(track.node, track.property, track.to);
        }
    }

    /// Drop every track targeting `node` without applying it.
    pub fn stop_node(&mut self, node: NodeId) {
        self.tracks.retain(|t| t.node != node);
    }

    /// Returns true if no track is running.
    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of running tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if no track is running.
    pub fn is_empty(&self) -> bool {
        self.is_idle()
    }
}
