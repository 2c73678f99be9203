// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: the scene shared by every prompt controller.
//!
//! A [`Stage`] bundles the node tree, the tween player, a timer queue, and the host services
//! (text measurement and key labels). It also owns the single top-level layer that shown
//! prompts hang from; the layer is created on first use and never removed.
//!
//! The host drives time with [`Stage::advance`]: tweens step first, then due timers run in
//! order. Timer callbacks run outside of any stage borrow, so they may use the stage freely.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use beckon_tree::{NodeFlags, NodeId, NodeKind, Props, Tree, Tweener};

use crate::keys::{KeyLabeler, UsLayout};
use crate::layout::{FixedAdvance, TextMeasure};

/// Name of the shared top-level layer.
pub const LAYER_NAME: &str = "PromptLayer";

struct Timer {
    due: f64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

/// Mutable state behind a [`Stage`].
pub struct StageState {
    /// Scene nodes.
    pub tree: Tree,
    /// Running tweens.
    pub tweens: Tweener,
    layer: Option<NodeId>,
    measure: Box<dyn TextMeasure>,
    labeler: Box<dyn KeyLabeler>,
    now: f64,
    next_seq: u64,
    timers: Vec<Timer>,
}

impl core::fmt::Debug for StageState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StageState")
            .field("tree", &self.tree)
            .field("tweens", &self.tweens.len())
            .field("layer", &self.layer)
            .field("now", &self.now)
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl StageState {
    /// The shared top-level layer, created on first use.
    pub fn layer(&mut self) -> NodeId {
        if let Some(layer) = self.layer
            && self.tree.is_alive(layer)
        {
            return layer;
        }
        let layer = self.tree.insert(
            None,
            NodeKind::Layer,
            Props {
                name: String::from(LAYER_NAME),
                flags: NodeFlags::VISIBLE,
                ..Props::default()
            },
        );
        self.layer = Some(layer);
        layer
    }

    /// Text measurement service.
    pub fn measure(&self) -> &dyn TextMeasure {
        &*self.measure
    }

    /// Key label service.
    pub fn labeler(&self) -> &dyn KeyLabeler {
        &*self.labeler
    }
}

/// Shared handle to the scene. Clones refer to the same stage.
#[derive(Clone, Debug)]
pub struct Stage {
    inner: Rc<RefCell<StageState>>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Create a stage with [`FixedAdvance`] measurement and [`UsLayout`] key labels.
    pub fn new() -> Self {
        Self::with_services(FixedAdvance::default(), UsLayout)
    }

    /// Create a stage with host-provided services.
    pub fn with_services(
        measure: impl TextMeasure + 'static,
        labeler: impl KeyLabeler + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StageState {
                tree: Tree::new(),
                tweens: Tweener::new(),
                layer: None,
                measure: Box::new(measure),
                labeler: Box::new(labeler),
                now: 0.0,
                next_seq: 0,
                timers: Vec::new(),
            })),
        }
    }

    /// Run `f` with exclusive access to the stage.
    ///
    /// # Panics
    ///
    /// Panics if called from inside another `with` on the same stage.
    pub fn with<R>(&self, f: impl FnOnce(&mut StageState) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// The shared top-level layer, created on first use.
    pub fn layer(&self) -> NodeId {
        self.with(StageState::layer)
    }

    /// Seconds advanced so far.
    pub fn now(&self) -> f64 {
        self.inner.borrow().now
    }

    /// Run `callback` once `seconds` have been advanced. Timers cannot be cancelled.
    pub fn delay(&self, seconds: f64, callback: impl FnOnce() + 'static) {
        let mut state = self.inner.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.now + seconds.max(0.0);
        state.timers.push(Timer {
            due,
            seq,
            callback: Box::new(callback),
        });
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Advance time by `dt` seconds: step tweens, then run due timers in schedule order.
    pub fn advance(&self, dt: f64) {
        let mut due = {
            let mut state = self.inner.borrow_mut();
            let state = &mut *state;
            state.tweens.advance(&mut state.tree, dt);
            state.now += dt;
            let now = state.now;
            let (due, pending): (Vec<Timer>, Vec<Timer>) = core::mem::take(&mut state.timers)
                .into_iter()
                .partition(|t| t.due <= now);
            state.timers = pending;
            due
        };
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        for timer in due {
            (timer.callback)();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;

    #[test]
    fn layer_is_created_once() {
        let stage = Stage::new();
        let a = stage.layer();
        let b = stage.layer();
        assert_eq!(a, b);
        stage.with(|s| {
            assert_eq!(s.tree.len(), 1);
            assert_eq!(s.tree.props(a).map(|p| p.name.as_str()), Some(LAYER_NAME));
        });
    }

    #[test]
    fn timers_fire_in_order_once_due() {
        let stage = Stage::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(0.5, "late"), (0.2, "early"), (0.2, "early-second")] {
            let l = log.clone();
            stage.delay(delay, move || l.borrow_mut().push(tag));
        }
        stage.advance(0.1);
        assert!(log.borrow().is_empty());
        stage.advance(0.15);
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);
        stage.advance(1.0);
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(stage.pending_timers(), 0);
    }

    #[test]
    fn timer_callbacks_may_use_the_stage() {
        let stage = Stage::new();
        let fired = Rc::new(Cell::new(false));
        let (s, f) = (stage.clone(), fired.clone());
        stage.delay(0.0, move || {
            s.layer();
            s.delay(1.0, move || f.set(true));
        });
        stage.advance(0.0);
        assert_eq!(stage.pending_timers(), 1);
        stage.advance(1.0);
        assert!(fired.get());
    }
}
