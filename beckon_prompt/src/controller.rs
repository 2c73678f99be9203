// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-prompt state machine.
//!
//! ```text
//! Idle ──shown──▶ Visible { holding: false } ◀──hold ended── Visible { holding: true }
//!   ▲                   │          └──────────hold began──────────▲
//!   │                hidden
//!   │                   ▼
//!   └──detach delay── Hidden
//! ```
//!
//! ## Scopes
//!
//! - The *root* scope lives as long as the controller and holds the subscriptions to the
//!   prompt bus and to hold-duration changes.
//! - The *lifecycle* scope is replaced on every show and released on hide. It holds every
//!   subscription that is only valid while the prompt is displayed: hold, trigger, property
//!   changes, pointer input, and the one-shot hidden event.
//!
//! ## Stale detach
//!
//! Hiding schedules the billboard's removal from the scene after a short delay. The timer is
//! tagged with the show session it belongs to; if the prompt was shown again in the meantime
//! the timer does nothing.
//!
//! ## Reentrancy
//!
//! Event handlers borrow the controller. Dropping or destroying a controller from inside
//! [`Stage::with`] panics.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::{Cell, RefCell};

use beckon_tree::{TweenInfo, UDim2};
use ui_events::pointer::PointerType;

use crate::Error;
use crate::animation::{AnimationGroups, Group};
use crate::device::{self, Device, Slots};
use crate::glyph::{self, Binding};
use crate::keys::InputKind;
use crate::layout::{self, Layout, LayoutInput};
use crate::prompt::{Prompt, PromptProperty, PromptService, PromptStyle};
use crate::scope::Scope;
use crate::signal::Signal;
use crate::stage::Stage;
use crate::theme::Theme;
use crate::visual::VisualTree;

/// Display state of a controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Not in the scene.
    #[default]
    Idle,
    /// In the scene.
    Visible {
        /// A hold is running.
        holding: bool,
    },
    /// Faded out; leaves the scene when the detach delay elapses.
    Hidden,
}

/// Stage of a pointer interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Press.
    Began,
    /// Move while pressed.
    Changed,
    /// Release.
    Ended,
}

/// Pointer input on the prompt's overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Device that produced the input.
    pub pointer: PointerType,
    /// Stage of the interaction.
    pub phase: PointerPhase,
}

/// Node ids owned by a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PromptNodes {
    /// Long-lived hierarchy.
    pub visual: VisualTree,
    /// Reusable device-specific nodes.
    pub slots: Slots,
}

struct Controller {
    prompt: Prompt,
    stage: Stage,
    theme: Theme,
    nodes: PromptNodes,
    groups: AnimationGroups,
    hold_info: TweenInfo,
    root: Scope,
    lifecycle: Scope,
    phase: Phase,
    session: u64,
    layout: Option<Layout>,
    fault: Option<Error>,
    destroyed: bool,
}

struct Shared {
    state: RefCell<Controller>,
    pointer: Signal<PointerInput>,
}

/// Drives the visuals of one [`Prompt`].
///
/// A controller subscribes to the [`PromptService`] on construction. Shown events for other
/// prompts, or for prompts with the [`PromptStyle::Default`] style, are ignored.
pub struct PromptController {
    shared: Rc<Shared>,
}

impl core::fmt::Debug for PromptController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.shared.state.try_borrow() {
            Ok(c) => f
                .debug_struct("PromptController")
                .field("prompt", &c.prompt)
                .field("phase", &c.phase)
                .field("session", &c.session)
                .field("destroyed", &c.destroyed)
                .finish_non_exhaustive(),
            Err(_) => f.write_str("PromptController { <busy> }"),
        }
    }
}

impl PromptController {
    /// Create a controller for `prompt` with the default [`Theme`].
    pub fn new(prompt: Prompt, service: &PromptService, stage: &Stage) -> Self {
        Self::with_theme(prompt, service, stage, Theme::default())
    }

    /// Create a controller for `prompt`.
    ///
    /// Builds the static hierarchy (detached) and subscribes to `service`.
    pub fn with_theme(prompt: Prompt, service: &PromptService, stage: &Stage, theme: Theme) -> Self {
        let mut groups = AnimationGroups::new();
        let nodes = stage.with(|s| PromptNodes {
            visual: VisualTree::build(&mut s.tree, &theme, &mut groups),
            slots: Slots::build(&mut s.tree, &theme),
        });
        let shared = Rc::new(Shared {
            state: RefCell::new(Controller {
                hold_info: TweenInfo::linear(prompt.hold_duration()),
                prompt: prompt.clone(),
                stage: stage.clone(),
                theme,
                nodes,
                groups,
                root: Scope::new(),
                lifecycle: Scope::new(),
                phase: Phase::Idle,
                session: 0,
                layout: None,
                fault: None,
                destroyed: false,
            }),
            pointer: Signal::new(),
        });

        let weak = Rc::downgrade(&shared);
        let mut c = shared.state.borrow_mut();
        c.relayout();
        let w = weak.clone();
        c.root.add(
            service
                .shown()
                .connect(move |(shown, input)| on_shown(&w, shown, *input)),
        );
        c.root.add(prompt.hold_duration_changed().connect(move |seconds| {
            if let Some(shared) = weak.upgrade() {
                shared.state.borrow_mut().hold_info = TweenInfo::linear(*seconds);
            }
        }));
        drop(c);
        Self { shared }
    }

    /// Show the prompt for `input`, bypassing the bus filters.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedKey`] if `input` needs a keyboard glyph and the bound key has
    ///   none. Nothing is attached.
    /// - [`Error::Destroyed`] after [`destroy`](Self::destroy).
    pub fn show(&self, input: InputKind) -> Result<(), Error> {
        show(&self.shared, input)
    }

    /// Deliver pointer input to the overlay. Ignored unless the overlay is attached.
    pub fn pointer_input(&self, input: PointerInput) {
        self.shared.pointer.fire(&input);
    }

    /// The driven prompt.
    pub fn prompt(&self) -> Prompt {
        self.shared.state.borrow().prompt.clone()
    }

    /// Current display state.
    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    /// Number of shows so far.
    pub fn session(&self) -> u64 {
        self.shared.state.borrow().session
    }

    /// The error of the latest failed show, cleared by the next successful one.
    pub fn fault(&self) -> Option<Error> {
        self.shared.state.borrow().fault.clone()
    }

    /// Node ids owned by the controller. Stale after [`destroy`](Self::destroy).
    pub fn nodes(&self) -> PromptNodes {
        self.shared.state.borrow().nodes
    }

    /// The latest layout.
    pub fn layout(&self) -> Option<Layout> {
        self.shared.state.borrow().layout
    }

    /// Returns true after [`destroy`](Self::destroy).
    pub fn is_destroyed(&self) -> bool {
        self.shared.state.borrow().destroyed
    }

    /// Release every subscription and remove every node. Calling it again does nothing.
    ///
    /// Running tweens on the removed nodes are dropped by the tween player and a pending
    /// detach timer becomes a no-op.
    pub fn destroy(&self) {
        let mut c = self.shared.state.borrow_mut();
        if c.destroyed {
            return;
        }
        c.destroyed = true;
        c.lifecycle.release();
        c.root.release();
        c.groups.clear();
        c.phase = Phase::Idle;
        let PromptNodes { visual, slots } = c.nodes;
        c.stage.with(|s| {
            for node in visual.roots().into_iter().chain(slots.all()) {
                s.tree.remove(node);
            }
        });
        tracing::debug!(prompt = %c.prompt.name(), "prompt controller destroyed");
    }
}

impl Drop for PromptController {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn on_shown(weak: &Weak<Shared>, prompt: &Prompt, input: InputKind) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    {
        let c = shared.state.borrow();
        if c.destroyed || !prompt.same_as(&c.prompt) || prompt.style() == PromptStyle::Default {
            return;
        }
    }
    // Failures are logged and kept as the controller's fault.
    let _ = show(&shared, input);
}

/// Wrap `f` into a signal handler that runs against the live controller.
fn handler<T: 'static>(
    weak: &Weak<Shared>,
    f: impl Fn(&mut Controller) + 'static,
) -> impl Fn(&T) + 'static {
    let weak = weak.clone();
    move |_: &T| {
        if let Some(shared) = weak.upgrade() {
            let mut c = shared.state.borrow_mut();
            if !c.destroyed {
                f(&mut *c);
            }
        }
    }
}

fn show(shared: &Rc<Shared>, input: InputKind) -> Result<(), Error> {
    let weak = Rc::downgrade(shared);
    let mut guard = shared.state.borrow_mut();
    let c = &mut *guard;
    if c.destroyed {
        return Err(Error::Destroyed);
    }
    let prompt = c.prompt.clone();

    let keyboard = prompt.keyboard_key();
    let raw_label = c.stage.with(|s| s.labeler().label(keyboard));
    let binding = Binding {
        keyboard,
        gamepad: prompt.gamepad_key(),
        raw_label: &raw_label,
    };
    let glyph = match glyph::resolve(input, &binding) {
        Ok(glyph) => glyph,
        Err(err) => {
            let name = prompt.name();
            tracing::error!(prompt = %name, key = ?err.key, "unsupported key code for rendering");
            let err = Error::UnsupportedKey {
                prompt: name,
                key: err.key,
            };
            c.fault = Some(err.clone());
            return Err(err);
        }
    };

    c.lifecycle.replace();
    c.session += 1;
    c.fault = None;

    let hold_duration = prompt.hold_duration();
    let target = Device {
        input,
        glyph: &glyph,
        hold_duration,
        clickable: prompt.clickable(),
    };
    let PromptNodes { visual, slots } = c.nodes;
    let attached = c.stage.with(|s| {
        s.tweens.stop_node(visual.progress.bar);
        s.tweens.stop_node(visual.indicator);
        device::rebuild(
            &mut s.tree,
            &visual,
            &slots,
            &mut c.groups,
            &c.theme,
            &target,
        )
    });

    let scope = &mut c.lifecycle;
    if attached.overlay {
        let down = Rc::new(Cell::new(false));
        let p = prompt.clone();
        scope.add(shared.pointer.connect(move |input: &PointerInput| {
            if !matches!(input.pointer, PointerType::Touch | PointerType::Mouse) {
                return;
            }
            match input.phase {
                PointerPhase::Began => {
                    p.begin_hold();
                    down.set(true);
                }
                PointerPhase::Ended => {
                    if down.replace(false) {
                        p.end_hold();
                    }
                }
                PointerPhase::Changed => {}
            }
        }));
    }
    if hold_duration > 0.0 {
        scope.add(prompt.hold_began().connect(handler::<()>(&weak, |c| {
            if let Phase::Visible { holding } = &mut c.phase {
                *holding = true;
            }
            c.play(Group::HoldBegin);
        })));
        scope.add(prompt.hold_ended().connect(handler::<()>(&weak, |c| {
            if let Phase::Visible { holding } = &mut c.phase {
                *holding = false;
            }
            c.play(Group::HoldEnd);
        })));
    }
    scope.add(
        prompt
            .triggered()
            .connect(handler::<()>(&weak, |c| c.play(Group::FadeOut))),
    );
    scope.add(
        prompt
            .trigger_ended()
            .connect(handler::<()>(&weak, |c| c.play(Group::FadeIn))),
    );
    scope.add(
        prompt
            .changed()
            .connect(handler::<PromptProperty>(&weak, Controller::relayout)),
    );
    let w = weak.clone();
    scope.add(prompt.hidden().connect(move |_| {
        if let Some(shared) = w.upgrade() {
            hide(&shared);
        }
    }));

    c.relayout();
    let layer = c.stage.layer();
    let adornee = prompt.parent();
    c.stage.with(|s| {
        if let Some(p) = s.tree.props_mut(visual.billboard) {
            p.adornee = adornee;
        }
        s.tree.reparent(visual.billboard, Some(layer));
    });
    c.phase = Phase::Visible { holding: false };
    c.play(Group::FadeIn);
    tracing::debug!(
        prompt = %prompt.name(),
        ?input,
        session = c.session,
        hold = hold_duration,
        "prompt shown"
    );
    Ok(())
}

fn hide(shared: &Rc<Shared>) {
    let weak = Rc::downgrade(shared);
    let mut c = shared.state.borrow_mut();
    if c.destroyed || !matches!(c.phase, Phase::Visible { .. }) {
        return;
    }
    c.lifecycle.release();
    c.play(Group::FadeOut);
    c.phase = Phase::Hidden;
    let session = c.session;
    tracing::debug!(prompt = %c.prompt.name(), session, "prompt hidden");
    c.stage.delay(c.theme.detach_delay, move || {
        if let Some(shared) = weak.upgrade() {
            shared.state.borrow_mut().detach(session);
        }
    });
}

impl Controller {
    fn play(&mut self, group: Group) {
        let hold = self.hold_info;
        self.stage
            .with(|s| self.groups.play(group, &mut s.tree, &mut s.tweens, hold));
    }

    fn detach(&mut self, session: u64) {
        if self.destroyed {
            return;
        }
        if self.phase != Phase::Hidden || self.session != session {
            tracing::debug!(
                prompt = %self.prompt.name(),
                scheduled = session,
                current = self.session,
                "stale detach suppressed"
            );
            return;
        }
        let billboard = self.nodes.visual.billboard;
        self.stage.with(|s| s.tree.reparent(billboard, None));
        self.phase = Phase::Idle;
        tracing::debug!(prompt = %self.prompt.name(), session, "prompt detached");
    }

    fn relayout(&mut self) {
        let prompt = &self.prompt;
        let action = prompt.action_text();
        let object = prompt.object_text();
        let auto_localize = prompt.auto_localize();
        let table: Option<String> = prompt.localization_table();
        let input = LayoutInput {
            action_text: &action,
            object_text: &object,
            ui_offset: prompt.ui_offset(),
        };
        let visual = self.nodes.visual;
        let theme = &self.theme;
        let layout = self.stage.with(|s| {
            let layout = layout::compute(&input, theme, s.measure());
            for (label, text, position) in [
                (visual.action_label, &action, layout.action_position),
                (visual.object_label, &object, layout.object_position),
            ] {
                if let Some(p) = s.tree.props_mut(label) {
                    p.text.clone_from(text);
                    p.position = position;
                    p.auto_localize = auto_localize;
                    p.localization_table.clone_from(&table);
                }
            }
            if let Some(p) = s.tree.props_mut(visual.billboard) {
                p.size = UDim2::from_offset(layout.size.width, layout.size.height);
                p.size_offset = layout.size_offset;
            }
            layout
        });
        tracing::trace!(width = layout.size.width, "prompt relayout");
        self.layout = Some(layout);
    }
}
