//! Controlling terminal handling
//!
//! This module owns everything that talks to the tty directly: entering and
//! leaving raw mode, unbuffered byte input, window size detection and the
//! termination signals that must still restore the terminal.

mod raw;
mod signals;
mod size;
mod tty;

pub use raw::{make_raw, RawMode, Restore};
pub use signals::{install_signal_handlers, terminate_requested};
pub use size::{parse_cursor_report, probe_cursor_position, query_winsize, window_size};
pub use tty::TtyReader;

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Failed to read terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("Failed to apply terminal attributes: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("Failed to query window size: {0}")]
    WindowSize(#[source] nix::Error),

    #[error("Malformed cursor position report")]
    CursorReport,

    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] nix::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for terminal operations
pub type TermResult<T> = Result<T, TermError>;

/// Terminal window size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

impl WindowSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(24, 80)
    }
}
