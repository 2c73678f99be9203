// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::keys::Code;

/// Errors surfaced by a [`PromptController`](crate::PromptController).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The prompt's keyboard binding cannot be drawn. This is a data defect in the prompt,
    /// not a runtime condition.
    #[error("prompt `{prompt}` has an unsupported key code for rendering: {key:?}")]
    UnsupportedKey {
        /// Name of the offending prompt.
        prompt: String,
        /// The unrenderable key.
        key: Code,
    },
    /// The controller was already destroyed.
    #[error("prompt controller has been destroyed")]
    Destroyed,
}
