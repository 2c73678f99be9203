// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input bindings: gamepad buttons and printable key labels.
//!
//! Keyboard bindings are physical [`Code`]s. What a physical key *prints* depends on the
//! user's layout, so the raw label comes from a [`KeyLabeler`] supplied by the host.

use alloc::string::String;

pub use ui_events::keyboard::Code;

/// Input device family currently driving the prompt.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InputKind {
    /// Keyboard and mouse.
    Keyboard,
    /// Game controller.
    Gamepad,
    /// Touch screen.
    Touch,
    /// Anything else; rendered like a keyboard.
    Other,
}

/// Gamepad buttons a prompt can be bound to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GamepadButton {
    /// Bottom face button.
    A,
    /// Right face button.
    B,
    /// Left face button.
    X,
    /// Top face button.
    Y,
    /// Left shoulder.
    L1,
    /// Right shoulder.
    R1,
    /// Left trigger.
    L2,
    /// Right trigger.
    R2,
    /// Left stick press.
    L3,
    /// Right stick press.
    R3,
    /// Start / menu.
    Start,
    /// Select / view.
    Select,
    /// D-pad up.
    DPadUp,
    /// D-pad down.
    DPadDown,
    /// D-pad left.
    DPadLeft,
    /// D-pad right.
    DPadRight,
}

/// Maps a physical key to the text it prints under the active layout.
pub trait KeyLabeler {
    /// Printable label for `code`, or an empty string for non-printing keys.
    fn label(&self, code: Code) -> String;
}

/// US QWERTY labels for printable keys.
#[derive(Copy, Clone, Debug, Default)]
pub struct UsLayout;

impl KeyLabeler for UsLayout {
    fn label(&self, code: Code) -> String {
        let label = match code {
            Code::KeyA => "A",
            Code::KeyB => "B",
            Code::KeyC => "C",
            Code::KeyD => "D",
            Code::KeyE => "E",
            Code::KeyF => "F",
            Code::KeyG => "G",
            Code::KeyH => "H",
            Code::KeyI => "I",
            Code::KeyJ => "J",
            Code::KeyK => "K",
            Code::KeyL => "L",
            Code::KeyM => "M",
            Code::KeyN => "N",
            Code::KeyO => "O",
            Code::KeyP => "P",
            Code::KeyQ => "Q",
            Code::KeyR => "R",
            Code::KeyS => "S",
            Code::KeyT => "T",
            Code::KeyU => "U",
            Code::KeyV => "V",
            Code::KeyW => "W",
            Code::KeyX => "X",
            Code::KeyY => "Y",
            Code::KeyZ => "Z",
            Code::Digit0 => "0",
            Code::Digit1 => "1",
            Code::Digit2 => "2",
            Code::Digit3 => "3",
            Code::Digit4 => "4",
            Code::Digit5 => "5",
            Code::Digit6 => "6",
            Code::Digit7 => "7",
            Code::Digit8 => "8",
            Code::Digit9 => "9",
            Code::Comma => ",",
            Code::Period => ".",
            Code::Quote => "'",
            Code::Backquote => "`",
            Code::Space => " ",
            Code::Semicolon => ";",
            Code::Slash => "/",
            Code::Backslash => "\\",
            Code::Minus => "-",
            Code::Equal => "=",
            Code::BracketLeft => "[",
            Code::BracketRight => "]",
            _ => "",
        };
        String::from(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_and_non_printing_keys() {
        assert_eq!(UsLayout.label(Code::KeyE), "E");
        assert_eq!(UsLayout.label(Code::Comma), ",");
        assert_eq!(UsLayout.label(Code::Space), " ");
        assert_eq!(UsLayout.label(Code::F5), "");
        assert_eq!(UsLayout.label(Code::Enter), "");
    }
}
