//! Viewer Core Module
//!
//! Terminal-independent viewer state. This module contains:
//! - Rows with tab expansion
//! - The read-only text buffer
//! - Cursor navigation
//! - The viewport and its scrolling rules
//!
//! Everything here is a pure state transition: no module in `core` performs
//! I/O except [`TextBuffer::open`], which loads a file.

mod buffer;
mod cursor;
mod row;
mod viewport;

pub use buffer::{BufferError, TextBuffer};
pub use cursor::{Cursor, Direction};
pub use row::{render_line, Row, CONTROL_PLACEHOLDER, TAB_STOP};
pub use viewport::Viewport;
