// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Beckon Prompt: device-aware interaction prompts.
//!
//! An interaction prompt is a small billboard attached to a world object that tells the user
//! which button to press (or hold) to act on it. This crate owns the per-prompt controller:
//!
//! - Resolves the glyph for the active input device and the bound button.
//! - Rebuilds the device-specific nodes on every show, reusing node slots.
//! - Plays four coordinated animation groups on hold, trigger, and visibility events.
//! - Scopes every event subscription to the display session that created it.
//!
//! ## Collaborators
//!
//! Nodes live in a [`beckon_tree::Tree`] owned by a shared [`Stage`], together with the tween
//! player, a timer queue, a [`TextMeasure`] service, and a [`KeyLabeler`]. The host advances
//! the stage every frame. Prompt visibility arrives through a [`PromptService`].
//!
//! ## API overview
//!
//! - [`PromptController`]: the state machine. See [`Phase`].
//! - [`Prompt`] / [`PromptService`]: the prompt descriptor and the global event bus.
//! - [`glyph::resolve`]: pure glyph lookup with the keyboard fallback chain.
//! - [`AnimationGroups`]: static and dynamic members of the four [`Group`]s.
//! - [`Scope`] / [`Signal`]: disposable subscriptions.
//! - [`layout::compute`]: pure layout from measured text.
//! - [`Theme`]: every visual constant.
//!
//! ## Example
//!
//! ```
//! use beckon_prompt::{InputKind, Phase, Prompt, PromptController, PromptService, PromptStyle, Stage};
//!
//! let stage = Stage::new();
//! let service = PromptService::new();
//! let prompt = Prompt::new("Door");
//! prompt.set_style(PromptStyle::Custom);
//! prompt.set_action_text("Open");
//! prompt.set_hold_duration(0.5);
//!
//! let controller = PromptController::new(prompt.clone(), &service, &stage);
//! service.show(&prompt, InputKind::Keyboard);
//! assert_eq!(controller.phase(), Phase::Visible { holding: false });
//!
//! prompt.begin_hold();
//! stage.advance(0.25);
//! assert_eq!(controller.phase(), Phase::Visible { holding: true });
//!
//! service.hide(&prompt);
//! stage.advance(0.25);
//! assert_eq!(controller.phase(), Phase::Idle);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod device;
pub mod glyph;
pub mod keys;
pub mod layout;
pub mod prompt;
pub mod scope;
pub mod signal;
pub mod stage;
pub mod theme;
pub mod visual;

mod controller;
mod error;

pub use animation::{AnimationGroups, Group};
pub use controller::{Phase, PointerInput, PointerPhase, PromptController, PromptNodes};
pub use error::Error;
pub use glyph::{Glyph, UnsupportedKey};
pub use keys::{Code, GamepadButton, InputKind, KeyLabeler, UsLayout};
pub use layout::{Layout, TextMeasure};
pub use prompt::{Prompt, PromptProperty, PromptService, PromptStyle};
pub use scope::Scope;
pub use signal::{Connection, Signal};
pub use stage::Stage;
pub use theme::Theme;
pub use ui_events::pointer::PointerType;
