// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The prompt descriptor and the global prompt event bus.
//!
//! A [`Prompt`] is owned by the host. It is a cheap, shared handle: clones refer to the
//! same prompt, and [`Prompt::same_as`] compares identity. Setters notify observers through
//! [`Prompt::changed`] only when the stored value actually changes.
//!
//! ## Hold and trigger events
//!
//! - [`Prompt::begin_hold`] starts a hold when the hold duration is positive
//!   ([`Prompt::hold_began`]); otherwise it triggers at once ([`Prompt::triggered`]).
//! - [`Prompt::complete_hold`] finishes a running hold: [`Prompt::hold_ended`] then
//!   [`Prompt::triggered`].
//! - [`Prompt::end_hold`] releases the button: [`Prompt::hold_ended`] if a hold was running,
//!   [`Prompt::trigger_ended`] if the prompt had triggered.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};

use beckon_tree::Adornee;
use kurbo::Vec2;

use crate::keys::{Code, GamepadButton, InputKind};
use crate::signal::Signal;

/// Display style of a prompt.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PromptStyle {
    /// Drawn by the host's built-in UI; ignored by prompt controllers.
    #[default]
    Default,
    /// Drawn by a [`PromptController`](crate::PromptController).
    Custom,
}

/// Property of a [`Prompt`], reported by [`Prompt::changed`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PromptProperty {
    /// [`Prompt::name`].
    Name,
    /// [`Prompt::action_text`].
    ActionText,
    /// [`Prompt::object_text`].
    ObjectText,
    /// [`Prompt::hold_duration`].
    HoldDuration,
    /// [`Prompt::keyboard_key`].
    KeyboardKey,
    /// [`Prompt::gamepad_key`].
    GamepadKey,
    /// [`Prompt::clickable`].
    Clickable,
    /// [`Prompt::ui_offset`].
    UiOffset,
    /// [`Prompt::auto_localize`].
    AutoLocalize,
    /// [`Prompt::localization_table`].
    LocalizationTable,
    /// [`Prompt::style`].
    Style,
    /// [`Prompt::parent`].
    Parent,
}

#[derive(Clone, Debug)]
struct Fields {
    name: String,
    action_text: String,
    object_text: String,
    hold_duration: f64,
    keyboard_key: Code,
    gamepad_key: GamepadButton,
    clickable: bool,
    ui_offset: Vec2,
    auto_localize: bool,
    localization_table: Option<String>,
    style: PromptStyle,
    parent: Option<Adornee>,
}

#[derive(Debug)]
struct PromptInner {
    fields: RefCell<Fields>,
    holding: Cell<bool>,
    active: Cell<bool>,
    changed: Signal<PromptProperty>,
    hold_duration_changed: Signal<f64>,
    hold_began: Signal<()>,
    hold_ended: Signal<()>,
    triggered: Signal<()>,
    trigger_ended: Signal<()>,
    hidden: Signal<()>,
}

/// Shared handle to an interaction prompt.
#[derive(Clone)]
pub struct Prompt {
    inner: Rc<PromptInner>,
}

impl core::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let fields = self.inner.fields.borrow();
        f.debug_struct("Prompt")
            .field("name", &fields.name)
            .field("action_text", &fields.action_text)
            .field("hold_duration", &fields.hold_duration)
            .field("style", &fields.style)
            .finish_non_exhaustive()
    }
}

macro_rules! getters {
    ($($(#[$doc:meta])* $name:ident: $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self) -> $ty {
                self.inner.fields.borrow().$name.clone()
            }
        )*
    };
}

impl Prompt {
    /// Create a prompt named `name`, bound to `E` and the gamepad `X` button, with no hold
    /// and the [`PromptStyle::Default`] style.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(PromptInner {
                fields: RefCell::new(Fields {
                    name: name.into(),
                    action_text: String::new(),
                    object_text: String::new(),
                    hold_duration: 0.0,
                    keyboard_key: Code::KeyE,
                    gamepad_key: GamepadButton::X,
                    clickable: true,
                    ui_offset: Vec2::ZERO,
                    auto_localize: true,
                    localization_table: None,
                    style: PromptStyle::Default,
                    parent: None,
                }),
                holding: Cell::new(false),
                active: Cell::new(false),
                changed: Signal::new(),
                hold_duration_changed: Signal::new(),
                hold_began: Signal::new(),
                hold_ended: Signal::new(),
                triggered: Signal::new(),
                trigger_ended: Signal::new(),
                hidden: Signal::new(),
            }),
        }
    }

    /// Returns true if both handles refer to the same prompt.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    getters! {
        /// Debug name, used in error reports.
        name: String;
        /// Verb shown on the prompt ("Open").
        action_text: String;
        /// Object the action applies to ("Door").
        object_text: String;
        /// Seconds the button must be held; `0` triggers on press.
        hold_duration: f64;
        /// Bound keyboard key.
        keyboard_key: Code;
        /// Bound gamepad button.
        gamepad_key: GamepadButton;
        /// Whether pointer clicks on the prompt activate it.
        clickable: bool;
        /// On-screen offset in pixels.
        ui_offset: Vec2;
        /// Whether labels are run through the host's translator.
        auto_localize: bool;
        /// Localization table for the labels.
        localization_table: Option<String>;
        /// Display style.
        style: PromptStyle;
        /// World object the prompt is attached to.
        parent: Option<Adornee>;
    }

    fn set<V: PartialEq>(
        &self,
        property: PromptProperty,
        field: fn(&mut Fields) -> &mut V,
        value: V,
    ) -> bool {
        {
            let mut fields = self.inner.fields.borrow_mut();
            let slot = field(&mut fields);
            if *slot == value {
                return false;
            }
            *slot = value;
        }
        self.inner.changed.fire(&property);
        true
    }

    /// Set the debug name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.set(PromptProperty::Name, |f| &mut f.name, name.into());
    }

    /// Set the action text.
    pub fn set_action_text(&self, text: impl Into<String>) {
        self.set(PromptProperty::ActionText, |f| &mut f.action_text, text.into());
    }

    /// Set the object text.
    pub fn set_object_text(&self, text: impl Into<String>) {
        self.set(PromptProperty::ObjectText, |f| &mut f.object_text, text.into());
    }

    /// Set the hold duration in seconds. Negative values are treated as `0`.
    pub fn set_hold_duration(&self, seconds: f64) {
        let seconds = seconds.max(0.0);
        if self.set(PromptProperty::HoldDuration, |f| &mut f.hold_duration, seconds) {
            self.inner.hold_duration_changed.fire(&seconds);
        }
    }

    /// Set the bound keyboard key.
    pub fn set_keyboard_key(&self, key: Code) {
        self.set(PromptProperty::KeyboardKey, |f| &mut f.keyboard_key, key);
    }

    /// Set the bound gamepad button.
    pub fn set_gamepad_key(&self, button: GamepadButton) {
        self.set(PromptProperty::GamepadKey, |f| &mut f.gamepad_key, button);
    }

    /// Allow or forbid activation by pointer click.
    pub fn set_clickable(&self, clickable: bool) {
        self.set(PromptProperty::Clickable, |f| &mut f.clickable, clickable);
    }

    /// Set the on-screen offset in pixels.
    pub fn set_ui_offset(&self, offset: Vec2) {
        self.set(PromptProperty::UiOffset, |f| &mut f.ui_offset, offset);
    }

    /// Set whether labels are localized automatically.
    pub fn set_auto_localize(&self, auto_localize: bool) {
        self.set(
            PromptProperty::AutoLocalize,
            |f| &mut f.auto_localize,
            auto_localize,
        );
    }

    /// Set the localization table.
    pub fn set_localization_table(&self, table: Option<String>) {
        self.set(
            PromptProperty::LocalizationTable,
            |f| &mut f.localization_table,
            table,
        );
    }

    /// Set the display style.
    pub fn set_style(&self, style: PromptStyle) {
        self.set(PromptProperty::Style, |f| &mut f.style, style);
    }

    /// Set the world object the prompt is attached to.
    pub fn set_parent(&self, parent: Option<Adornee>) {
        self.set(PromptProperty::Parent, |f| &mut f.parent, parent);
    }

    /// Returns true while a hold is running.
    pub fn is_holding(&self) -> bool {
        self.inner.holding.get()
    }

    /// Returns true between [`triggered`](Self::triggered) and
    /// [`trigger_ended`](Self::trigger_ended).
    pub fn is_triggered(&self) -> bool {
        self.inner.active.get()
    }

    /// The user pressed the bound button.
    pub fn begin_hold(&self) {
        if self.is_holding() || self.is_triggered() {
            return;
        }
        if self.hold_duration() > 0.0 {
            self.inner.holding.set(true);
            self.inner.hold_began.fire(&());
        } else {
            self.inner.active.set(true);
            self.inner.triggered.fire(&());
        }
    }

    /// The button was held for the full hold duration.
    pub fn complete_hold(&self) {
        if !self.inner.holding.replace(false) {
            return;
        }
        self.inner.hold_ended.fire(&());
        self.inner.active.set(true);
        self.inner.triggered.fire(&());
    }

    /// The user released the bound button.
    pub fn end_hold(&self) {
        if self.inner.holding.replace(false) {
            self.inner.hold_ended.fire(&());
        }
        if self.inner.active.replace(false) {
            self.inner.trigger_ended.fire(&());
        }
    }

    /// Fires with the changed property after every effective setter call.
    pub fn changed(&self) -> &Signal<PromptProperty> {
        &self.inner.changed
    }

    /// Fires with the new duration after the hold duration changes.
    pub fn hold_duration_changed(&self) -> &Signal<f64> {
        &self.inner.hold_duration_changed
    }

    /// Fires when a hold starts.
    pub fn hold_began(&self) -> &Signal<()> {
        &self.inner.hold_began
    }

    /// Fires when a hold stops, completed or not.
    pub fn hold_ended(&self) -> &Signal<()> {
        &self.inner.hold_ended
    }

    /// Fires when the prompt activates.
    pub fn triggered(&self) -> &Signal<()> {
        &self.inner.triggered
    }

    /// Fires when the button is released after activation.
    pub fn trigger_ended(&self) -> &Signal<()> {
        &self.inner.trigger_ended
    }

    /// Fires once per shown session, when the prompt is hidden.
    pub fn hidden(&self) -> &Signal<()> {
        &self.inner.hidden
    }
}

/// The global prompt event bus.
///
/// The host calls [`show`](Self::show) when a prompt comes into range and
/// [`hide`](Self::hide) when it leaves. Every show is followed by exactly one hide.
#[derive(Debug, Default)]
pub struct PromptService {
    shown: Signal<(Prompt, InputKind)>,
}

impl PromptService {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires with the prompt and the active input device whenever a prompt is shown.
    pub fn shown(&self) -> &Signal<(Prompt, InputKind)> {
        &self.shown
    }

    /// Announce that `prompt` is shown for `input`.
    pub fn show(&self, prompt: &Prompt, input: InputKind) {
        self.shown.fire(&(prompt.clone(), input));
    }

    /// Announce that `prompt` is hidden. A running hold or trigger is dropped silently.
    pub fn hide(&self, prompt: &Prompt) {
        prompt.inner.holding.set(false);
        prompt.inner.active.set(false);
        prompt.inner.hidden.fire(&());
    }
}
