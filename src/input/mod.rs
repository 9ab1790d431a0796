//! Keyboard input
//!
//! Raw mode delivers keystrokes as bytes. Printable keys and control
//! combinations arrive as a single byte; navigation keys arrive as short
//! escape sequences which [`KeyDecoder`] folds back into a [`Key`].

mod decoder;

pub use decoder::KeyDecoder;

/// The escape byte that starts every multi-byte key sequence
pub const ESC: u8 = 0x1b;

/// A decoded keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A literal byte, including control characters
    Char(u8),

    // Cursor keys
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,

    // Navigation
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    /// A lone escape, an unreadable sequence or an unrecognized one
    Escape,
}

impl Key {
    /// The key produced by holding Ctrl with `c` (`c & 0x1f`)
    pub const fn ctrl(c: u8) -> Self {
        Key::Char(c & 0x1f)
    }
}
