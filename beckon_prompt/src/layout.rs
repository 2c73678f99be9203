// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prompt layout: sizing from measured text, label offsets, and the billboard offset.
//!
//! [`compute`] is pure; the controller calls it on every relevant property change.

use beckon_tree::{Font, UDim2};
use kurbo::{Size, Vec2};

use crate::theme::Theme;

/// A request to measure a run of text.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextRequest<'a> {
    /// Text to measure.
    pub text: &'a str,
    /// Text size in pixels.
    pub size: f64,
    /// Font face.
    pub font: Font,
    /// Maximum extent the text may occupy.
    pub bounds: Size,
}

/// Text measurement service.
pub trait TextMeasure {
    /// Size of the laid out text.
    fn measure(&self, request: &TextRequest<'_>) -> Size;
}

/// Measures every character as `advance * size` wide and one `size` tall.
///
/// Good enough for tests and headless hosts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Character width as a fraction of the text size.
    pub advance: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, request: &TextRequest<'_>) -> Size {
        if request.text.is_empty() {
            return Size::ZERO;
        }
        let chars = request.text.chars().count() as f64;
        Size::new(
            (chars * self.advance * request.size).min(request.bounds.width),
            request.size.min(request.bounds.height),
        )
    }
}

/// Inputs of a layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutInput<'a> {
    /// Action label text.
    pub action_text: &'a str,
    /// Object label text.
    pub object_text: &'a str,
    /// Requested on-screen offset of the prompt, in pixels.
    pub ui_offset: Vec2,
}

/// Result of a layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    /// Wider of the two measured labels.
    pub max_text_width: f64,
    /// Prompt size in pixels.
    pub size: Size,
    /// Action label position.
    pub action_position: UDim2,
    /// Object label position.
    pub object_position: UDim2,
    /// `ui_offset` in multiples of the prompt size.
    pub size_offset: Vec2,
}

/// Lay out a prompt.
pub fn compute(input: &LayoutInput<'_>, theme: &Theme, measure: &dyn TextMeasure) -> Layout {
    let measure_text = |text: &str, size: f64| {
        measure
            .measure(&TextRequest {
                text,
                size,
                font: theme.font,
                bounds: theme.measure_bounds,
            })
            .width
    };
    let action_width = measure_text(input.action_text, theme.action_text_size);
    let object_width = measure_text(input.object_text, theme.object_text_size);
    let max_text_width = action_width.max(object_width);

    let has_object = !input.object_text.is_empty();
    let width = if input.action_text.is_empty() && !has_object {
        theme.min_width
    } else {
        theme.text_padding_left + max_text_width + theme.text_padding_right
    };
    let height = theme.height;

    let label_x = theme.text_padding_left - width / 2.0;
    let action_y = if has_object {
        theme.action_offset_with_object
    } else {
        0.0
    };

    Layout {
        max_text_width,
        size: Size::new(width, height),
        action_position: UDim2::new(0.5, label_x, 0.0, action_y),
        object_position: UDim2::new(0.5, label_x, 0.0, theme.object_offset),
        size_offset: Vec2::new(input.ui_offset.x / width, input.ui_offset.y / height),
    }
}
