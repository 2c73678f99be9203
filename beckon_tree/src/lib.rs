// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Beckon Tree: a retained UI node tree with property tweens.
//!
//! Beckon Tree is the scene layer under Beckon's interaction prompts.
//!
//! - Represents a hierarchy of nodes (panels, images, labels, buttons) with generational handles.
//! - Nodes can be detached and reattached without losing identity, so callers can keep
//!   reusable "slot" nodes around and only change where they hang.
//! - Exposes a small set of animatable properties and a [`Tweener`] that plays
//!   fire-and-forget tweens against them.
//!
//! ## Not a renderer
//!
//! This crate does not measure text, lay out nodes, or draw anything.
//! Hosts read [`Props`] off the tree and render it however they like.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, parent links, and property storage.
//! - [`NodeId`]: generational handle of a node.
//! - [`Props`]: per-node properties; [`NodeFlags`] for visibility and input.
//! - [`Property`] / [`Value`]: the animatable subset of [`Props`].
//! - [`Tweener`] + [`TweenInfo`]: timing curves and the player.
//!
//! Key operations:
//! - [`Tree::insert`] → [`NodeId`], [`Tree::reparent`], [`Tree::remove`]
//! - [`Tree::set_value`] and [`Tree::bind_rotation`] for derived rotations
//! - [`Tweener::play`] then [`Tweener::advance`] each frame
//!
//! ## Minimal usage
//!
//! ```
//! use beckon_tree::{NodeKind, Property, Props, Tree, TweenInfo, Tweener, Value};
//!
//! let mut tree = Tree::new();
//! let panel = tree.insert(None, NodeKind::Frame, Props::default());
//! let label = tree.insert(Some(panel), NodeKind::Text, Props::default());
//!
//! // Fade the label out over half a second.
//! let mut tweens = Tweener::new();
//! tweens.play(
//!     &mut tree,
//!     label,
//!     &[(Property::TextTransparency, Value::Scalar(1.0))],
//!     TweenInfo::linear(0.5),
//! );
//! tweens.advance(&mut tree, 0.5);
//! assert_eq!(tree.value(label, Property::TextTransparency), Some(Value::Scalar(1.0)));
//!
//! // Detach and reattach without losing identity.
//! tree.reparent(label, None);
//! assert!(tree.children(panel).is_empty());
//! tree.reparent(label, Some(panel));
//! assert_eq!(tree.children(panel), &[label]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod tween;
mod types;

pub use tree::Tree;
pub use tween::{EasingDirection, EasingStyle, TweenInfo, Tweener, ease};
pub use types::{
    Adornee, Font, NodeFlags, NodeId, NodeKind, Property, Props, Rgb, SizeConstraint, TextAlign,
    UDim, UDim2, Value,
};
