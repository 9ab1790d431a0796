//! Terminal Renderer Module
//!
//! Builds each frame as one string of text and escape sequences and writes
//! it in a single call. The sequences used are:
//!
//! | Sequence | Meaning |
//! |----------|---------|
//! | `CSI ? 25 l` / `CSI ? 25 h` | Hide / show cursor |
//! | `CSI H` | Cursor home |
//! | `CSI <row> ; <col> H` | Cursor position (1-based) |
//! | `CSI K` | Erase to end of line |
//! | `CSI 2 J` | Erase whole screen |

mod frame;

use std::io::{self, Write};

pub use frame::{compose_frame, welcome_banner, WELCOME};

pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const CURSOR_HOME: &str = "\x1b[H";
pub const CLEAR_LINE: &str = "\x1b[K";
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Separator between screen rows (output post-processing is off in raw mode)
pub const ROW_SEPARATOR: &str = "\r\n";

/// Marker drawn on screen rows past the end of the buffer
pub const EMPTY_ROW_MARKER: char = '~';

/// Cursor position sequence for 1-based `row` and `col`
pub fn cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{};{}H", row, col)
}

/// Write a complete frame and flush it
pub fn write_frame<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    out.write_all(frame.as_bytes())?;
    out.flush()
}

/// Erase the screen and home the cursor
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(CLEAR_SCREEN.as_bytes())?;
    out.write_all(CURSOR_HOME.as_bytes())?;
    out.flush()
}
