// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual constants of a prompt.

use beckon_tree::{EasingDirection, EasingStyle, Font, Rgb, TweenInfo};
use kurbo::Size;

/// Every tunable visual constant of a prompt.
///
/// [`Theme::default`] reproduces the stock prompt look.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Font of every label.
    pub font: Font,
    /// Action label text size.
    pub action_text_size: f64,
    /// Object label text size.
    pub object_text_size: f64,
    /// Key label text size for one- and two-character labels.
    pub key_text_size: f64,
    /// Key label text size for longer labels.
    pub key_text_size_long: f64,
    /// Space reserved left of the labels for the input indicator.
    pub text_padding_left: f64,
    /// Space right of the labels.
    pub text_padding_right: f64,
    /// Width when both labels are empty.
    pub min_width: f64,
    /// Prompt height.
    pub height: f64,
    /// Action label vertical offset when an object label is shown.
    pub action_offset_with_object: f64,
    /// Object label vertical offset.
    pub object_offset: f64,
    /// Bounds handed to the text measurer.
    pub measure_bounds: Size,
    /// Panel fill color.
    pub panel_color: Rgb,
    /// Panel transparency while shown.
    pub panel_transparency: f64,
    /// Indicator ring transparency while shown.
    pub ring_transparency: f64,
    /// Indicator ring diameter.
    pub ring_size: f64,
    /// Circular progress diameter.
    pub progress_size: f64,
    /// Indicator scale while holding with keyboard or gamepad.
    pub hold_scale: f64,
    /// Indicator scale while holding on touch.
    pub touch_hold_scale: f64,
    /// Label and panel transitions.
    pub fast: TweenInfo,
    /// Glyph and ring fades.
    pub quick: TweenInfo,
    /// Progress reset after a released hold.
    pub progress_reset: TweenInfo,
    /// Seconds between the hide fade starting and the prompt leaving the scene.
    pub detach_delay: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font: Font::SemiBold,
            action_text_size: 19.0,
            object_text_size: 14.0,
            key_text_size: 14.0,
            key_text_size_long: 12.0,
            text_padding_left: 72.0,
            text_padding_right: 24.0,
            min_width: 72.0,
            height: 72.0,
            action_offset_with_object: 9.0,
            object_offset: -10.0,
            measure_bounds: Size::new(1000.0, 1000.0),
            panel_color: [0.07, 0.07, 0.07],
            panel_transparency: 0.2,
            ring_transparency: 0.5,
            ring_size: 48.0,
            progress_size: 58.0,
            hold_scale: 1.33,
            touch_hold_scale: 1.6,
            fast: TweenInfo::new(0.2, EasingStyle::Quad, EasingDirection::Out),
            quick: TweenInfo::new(0.06, EasingStyle::Linear, EasingDirection::Out),
            progress_reset: TweenInfo::new(0.5, EasingStyle::Quad, EasingDirection::Out),
            detach_delay: 0.2,
        }
    }
}
