use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key symbol '{symbol}'")]
pub struct UnknownKeyError {
    pub symbol: String,
}

macro_rules! define_keys {
    ($($variant:ident),* $(,)?) => {
        /// Symbolic key codes, named the way they appear in a controls file.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Key {
            $($variant),*
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

define_keys! {
    Backspace, Tab, Return, Pause, Escape, Space,
    Alpha0, Alpha1, Alpha2, Alpha3, Alpha4, Alpha5, Alpha6, Alpha7, Alpha8, Alpha9,
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Keypad0, Keypad1, Keypad2, Keypad3, Keypad4, Keypad5, Keypad6, Keypad7, Keypad8, Keypad9,
    KeypadPeriod, KeypadDivide, KeypadMultiply, KeypadMinus, KeypadPlus, KeypadEnter,
    KeypadEquals,
    UpArrow, DownArrow, RightArrow, LeftArrow,
    Insert, Home, End, PageUp, PageDown, Delete,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, F13, F14, F15,
    Numlock, CapsLock, ScrollLock,
    RightShift, LeftShift, RightControl, LeftControl, RightAlt, LeftAlt,
    LeftWindows, RightWindows,
    Comma, Minus, Period, Slash, Semicolon, Equals,
    LeftBracket, Backslash, RightBracket, BackQuote, Quote,
    Print, Menu,
}

impl Key {
    pub const COUNT: usize = Key::ALL.len();

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Maps a physical keyboard key onto the symbolic set. Keys with no
    /// symbolic counterpart map to `None`.
    pub fn from_physical(key: PhysicalKey) -> Option<Self> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        let key = match code {
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Enter => Key::Return,
            KeyCode::Pause => Key::Pause,
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,
            KeyCode::Digit0 => Key::Alpha0,
            KeyCode::Digit1 => Key::Alpha1,
            KeyCode::Digit2 => Key::Alpha2,
            KeyCode::Digit3 => Key::Alpha3,
            KeyCode::Digit4 => Key::Alpha4,
            KeyCode::Digit5 => Key::Alpha5,
            KeyCode::Digit6 => Key::Alpha6,
            KeyCode::Digit7 => Key::Alpha7,
            KeyCode::Digit8 => Key::Alpha8,
            KeyCode::Digit9 => Key::Alpha9,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,
            KeyCode::Numpad0 => Key::Keypad0,
            KeyCode::Numpad1 => Key::Keypad1,
            KeyCode::Numpad2 => Key::Keypad2,
            KeyCode::Numpad3 => Key::Keypad3,
            KeyCode::Numpad4 => Key::Keypad4,
            KeyCode::Numpad5 => Key::Keypad5,
            KeyCode::Numpad6 => Key::Keypad6,
            KeyCode::Numpad7 => Key::Keypad7,
            KeyCode::Numpad8 => Key::Keypad8,
            KeyCode::Numpad9 => Key::Keypad9,
            KeyCode::NumpadDecimal => Key::KeypadPeriod,
            KeyCode::NumpadDivide => Key::KeypadDivide,
            KeyCode::NumpadMultiply => Key::KeypadMultiply,
            KeyCode::NumpadSubtract => Key::KeypadMinus,
            KeyCode::NumpadAdd => Key::KeypadPlus,
            KeyCode::NumpadEnter => Key::KeypadEnter,
            KeyCode::NumpadEqual => Key::KeypadEquals,
            KeyCode::ArrowUp => Key::UpArrow,
            KeyCode::ArrowDown => Key::DownArrow,
            KeyCode::ArrowRight => Key::RightArrow,
            KeyCode::ArrowLeft => Key::LeftArrow,
            KeyCode::Insert => Key::Insert,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Delete => Key::Delete,
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,
            KeyCode::F13 => Key::F13,
            KeyCode::F14 => Key::F14,
            KeyCode::F15 => Key::F15,
            KeyCode::NumLock => Key::Numlock,
            KeyCode::CapsLock => Key::CapsLock,
            KeyCode::ScrollLock => Key::ScrollLock,
            KeyCode::ShiftRight => Key::RightShift,
            KeyCode::ShiftLeft => Key::LeftShift,
            KeyCode::ControlRight => Key::RightControl,
            KeyCode::ControlLeft => Key::LeftControl,
            KeyCode::AltRight => Key::RightAlt,
            KeyCode::AltLeft => Key::LeftAlt,
            KeyCode::SuperLeft => Key::LeftWindows,
            KeyCode::SuperRight => Key::RightWindows,
            KeyCode::Comma => Key::Comma,
            KeyCode::Minus => Key::Minus,
            KeyCode::Period => Key::Period,
            KeyCode::Slash => Key::Slash,
            KeyCode::Semicolon => Key::Semicolon,
            KeyCode::Equal => Key::Equals,
            KeyCode::BracketLeft => Key::LeftBracket,
            KeyCode::Backslash => Key::Backslash,
            KeyCode::BracketRight => Key::RightBracket,
            KeyCode::Backquote => Key::BackQuote,
            KeyCode::Quote => Key::Quote,
            KeyCode::PrintScreen => Key::Print,
            KeyCode::ContextMenu => Key::Menu,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = UnknownKeyError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .iter()
            .copied()
            .find(|key| key.name() == symbol)
            .ok_or_else(|| UnknownKeyError {
                symbol: symbol.to_string(),
            })
    }
}
