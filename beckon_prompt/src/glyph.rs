// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph resolution: which picture (or text) represents the bound button.
//!
//! ## Keyboard fallback chain
//!
//! 1. The physical key has a dedicated image (return, backspace, shift, tab).
//! 2. The raw label is punctuation or space with a dedicated image.
//! 3. The key has a friendly name (function and modifier keys) that replaces the raw label.
//! 4. The raw label itself, when non-empty.
//! 5. Otherwise the binding cannot be rendered: [`UnsupportedKey`].
//!
//! Gamepad buttons only use direct images; unmapped buttons render no glyph.
//! Touch always shows the tap glyph.

use alloc::string::String;

use crate::keys::{Code, GamepadButton, InputKind};

/// Key backdrop drawn behind every keyboard glyph.
pub const KEY_BACKDROP_IMAGE: &str = "glyphs/keyboard/key_single.png";
/// Tap glyph used for touch input.
pub const TOUCH_TAP_IMAGE: &str = "glyphs/touch/tap.png";

/// Resolved visual for a binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Gamepad button image.
    Gamepad {
        /// Image reference.
        image: &'static str,
    },
    /// Gamepad button without an image; nothing is drawn.
    GamepadUnmapped,
    /// Touch tap image.
    Touch {
        /// Image reference.
        image: &'static str,
    },
    /// Keyboard key drawn as an image on the key backdrop.
    KeyImage {
        /// Image reference.
        image: &'static str,
    },
    /// Keyboard key drawn as text on the key backdrop.
    KeyText {
        /// Label text.
        text: String,
    },
}

impl Glyph {
    /// Returns true if the glyph draws on a key backdrop.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyImage { .. } | Self::KeyText { .. })
    }
}

/// A keyboard binding with no renderable representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("key code {key:?} has no glyph image, friendly name, or printable label")]
pub struct UnsupportedKey {
    /// The offending key.
    pub key: Code,
}

/// The bindings of a prompt, as seen by the resolver.
#[derive(Copy, Clone, Debug)]
pub struct Binding<'a> {
    /// Bound keyboard key.
    pub keyboard: Code,
    /// Bound gamepad button.
    pub gamepad: GamepadButton,
    /// What `keyboard` prints under the active layout.
    pub raw_label: &'a str,
}

/// Resolve the glyph for `input`.
pub fn resolve(input: InputKind, binding: &Binding<'_>) -> Result<Glyph, UnsupportedKey> {
    match input {
        InputKind::Gamepad => Ok(resolve_gamepad(binding.gamepad)),
        InputKind::Touch => Ok(Glyph::Touch {
            image: TOUCH_TAP_IMAGE,
        }),
        InputKind::Keyboard | InputKind::Other => {
            resolve_keyboard(binding.keyboard, binding.raw_label)
        }
    }
}

fn resolve_gamepad(button: GamepadButton) -> Glyph {
    match gamepad_image(button) {
        Some(image) => Glyph::Gamepad { image },
        None => Glyph::GamepadUnmapped,
    }
}

fn resolve_keyboard(key: Code, raw_label: &str) -> Result<Glyph, UnsupportedKey> {
    if let Some(image) = key_image(key).or_else(|| label_image(raw_label)) {
        return Ok(Glyph::KeyImage { image });
    }
    let text = key_text(key).unwrap_or(raw_label);
    if text.is_empty() {
        return Err(UnsupportedKey { key });
    }
    Ok(Glyph::KeyText {
        text: String::from(text),
    })
}

/// Direct gamepad button images.
pub fn gamepad_image(button: GamepadButton) -> Option<&'static str> {
    Some(match button {
        GamepadButton::X => "glyphs/gamepad/x.png",
        GamepadButton::Y => "glyphs/gamepad/y.png",
        GamepadButton::A => "glyphs/gamepad/a.png",
        GamepadButton::B => "glyphs/gamepad/b.png",
        GamepadButton::DPadLeft => "glyphs/gamepad/dpad_left.png",
        GamepadButton::DPadRight => "glyphs/gamepad/dpad_right.png",
        GamepadButton::DPadUp => "glyphs/gamepad/dpad_up.png",
        GamepadButton::DPadDown => "glyphs/gamepad/dpad_down.png",
        GamepadButton::Select => "glyphs/gamepad/menu.png",
        GamepadButton::L1 => "glyphs/gamepad/ls.png",
        GamepadButton::R1 => "glyphs/gamepad/rs.png",
        GamepadButton::L2
        | GamepadButton::R2
        | GamepadButton::L3
        | GamepadButton::R3
        | GamepadButton::Start => return None,
    })
}

/// Dedicated images for non-printing keyboard keys.
pub fn key_image(key: Code) -> Option<&'static str> {
    Some(match key {
        Code::Backspace => "glyphs/keyboard/backspace.png",
        Code::Enter => "glyphs/keyboard/return.png",
        Code::ShiftLeft | Code::ShiftRight => "glyphs/keyboard/shift.png",
        Code::Tab => "glyphs/keyboard/tab.png",
        _ => return None,
    })
}

/// Dedicated images for punctuation and space, keyed by printed label.
pub fn label_image(label: &str) -> Option<&'static str> {
    Some(match label {
        "'" => "glyphs/keyboard/apostrophe.png",
        "," => "glyphs/keyboard/comma.png",
        "`" => "glyphs/keyboard/grave_accent.png",
        "." => "glyphs/keyboard/period.png",
        " " => "glyphs/keyboard/spacebar.png",
        _ => return None,
    })
}

/// Friendly names for function and modifier keys.
pub fn key_text(key: Code) -> Option<&'static str> {
    Some(match key {
        Code::ControlLeft | Code::ControlRight => "Ctrl",
        Code::AltLeft | Code::AltRight => "Alt",
        Code::F1 => "F1",
        Code::F2 => "F2",
        Code::F3 => "F3",
        Code::F4 => "F4",
        Code::F5 => "F5",
        Code::F6 => "F6",
        Code::F7 => "F7",
        Code::F8 => "F8",
        Code::F9 => "F9",
        Code::F10 => "F10",
        Code::F11 => "F11",
        Code::F12 => "F12",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard(key: Code, raw_label: &str) -> Result<Glyph, UnsupportedKey> {
        resolve(
            InputKind::Keyboard,
            &Binding {
                keyboard: key,
                gamepad: GamepadButton::X,
                raw_label,
            },
        )
    }

    #[test]
    fn return_uses_dedicated_image_over_label() {
        assert_eq!(
            keyboard(Code::Enter, "Enter"),
            Ok(Glyph::KeyImage {
                image: "glyphs/keyboard/return.png"
            })
        );
    }

    #[test]
    fn comma_label_uses_punctuation_image() {
        assert_eq!(
            keyboard(Code::Comma, ","),
            Ok(Glyph::KeyImage {
                image: "glyphs/keyboard/comma.png"
            })
        );
    }

    #[test]
    fn function_key_uses_friendly_text() {
        assert_eq!(
            keyboard(Code::F5, ""),
            Ok(Glyph::KeyText { text: "F5".into() })
        );
        assert_eq!(
            keyboard(Code::ControlLeft, "LeftControl"),
            Ok(Glyph::KeyText {
                text: "Ctrl".into()
            })
        );
    }

    #[test]
    fn printable_key_falls_back_to_raw_label() {
        assert_eq!(
            keyboard(Code::KeyE, "E"),
            Ok(Glyph::KeyText { text: "E".into() })
        );
    }

    #[test]
    fn unmapped_key_without_label_is_rejected() {
        assert_eq!(
            keyboard(Code::CapsLock, ""),
            Err(UnsupportedKey {
                key: Code::CapsLock
            })
        );
    }

    #[test]
    fn other_input_follows_keyboard_path() {
        let glyph = resolve(
            InputKind::Other,
            &Binding {
                keyboard: Code::Tab,
                gamepad: GamepadButton::A,
                raw_label: "",
            },
        );
        assert_eq!(
            glyph,
            Ok(Glyph::KeyImage {
                image: "glyphs/keyboard/tab.png"
            })
        );
    }

    #[test]
    fn gamepad_mapped_and_unmapped() {
        let binding = |gamepad| Binding {
            keyboard: Code::CapsLock,
            gamepad,
            raw_label: "",
        };
        assert_eq!(
            resolve(InputKind::Gamepad, &binding(GamepadButton::X)),
            Ok(Glyph::Gamepad {
                image: "glyphs/gamepad/x.png"
            })
        );
        // An unmapped gamepad button is not an error, and the keyboard binding is irrelevant.
        assert_eq!(
            resolve(InputKind::Gamepad, &binding(GamepadButton::R2)),
            Ok(Glyph::GamepadUnmapped)
        );
    }

    #[test]
    fn touch_ignores_bindings() {
        let glyph = resolve(
            InputKind::Touch,
            &Binding {
                keyboard: Code::CapsLock,
                gamepad: GamepadButton::R3,
                raw_label: "",
            },
        );
        assert_eq!(
            glyph,
            Ok(Glyph::Touch {
                image: TOUCH_TAP_IMAGE
            })
        );
    }
}
