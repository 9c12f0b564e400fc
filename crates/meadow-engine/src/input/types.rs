use std::fmt;

/// Keyboard key, identified by physical position (US layout names).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,

    /// Letter key, always uppercase ASCII (`'A'..='Z'`).
    Letter(char),
    /// Top-row digit key, `0..=9`.
    Digit(u8),

    /// Any key not listed above, with the platform's stable code.
    Other(u32),
}

impl Key {
    /// Letter key for `c`, case-insensitive. `None` for non-ASCII-letters.
    pub fn letter(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_uppercase()))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{c}"),
            Key::Digit(d) => write!(f, "{d}"),
            Key::Other(code) => write!(f, "key#{code}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// OS auto-repeat of a held key.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}
