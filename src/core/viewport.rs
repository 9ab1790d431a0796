//! Viewport and scrolling
//!
//! The viewport is the window of the buffer that is on screen. After every
//! cursor move `scroll` shifts it by the smallest amount that brings the
//! cursor back into view; each axis is handled on its own.

use super::buffer::TextBuffer;
use super::cursor::Cursor;
use crate::term::WindowSize;

/// Visible region of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First buffer row on screen
    pub row_offset: usize,
    /// First display column on screen
    pub col_offset: usize,
    /// Screen height in rows
    pub rows: usize,
    /// Screen width in columns
    pub cols: usize,
}

impl Viewport {
    /// Create a viewport at the top-left of the buffer
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    pub fn from_size(size: WindowSize) -> Self {
        Self::new(usize::from(size.rows), usize::from(size.cols))
    }

    /// Shift the offsets so that row `y`, display column `rx` is visible
    pub fn scroll_to(&mut self, y: usize, rx: usize) {
        if y < self.row_offset {
            self.row_offset = y;
        }
        if y >= self.row_offset + self.rows {
            self.row_offset = (y + 1).saturating_sub(self.rows);
        }

        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if rx >= self.col_offset + self.cols {
            self.col_offset = (rx + 1).saturating_sub(self.cols);
        }
    }

    /// Bring `cursor` into view, measuring its column after tab expansion
    pub fn scroll(&mut self, cursor: &Cursor, buffer: &TextBuffer) {
        let rx = buffer.render_x(cursor.y, cursor.x);
        self.scroll_to(cursor.y, rx);
    }

    /// Whether row `y`, display column `rx` is on screen
    pub fn contains(&self, y: usize, rx: usize) -> bool {
        y >= self.row_offset
            && y < self.row_offset + self.rows
            && rx >= self.col_offset
            && rx < self.col_offset + self.cols
    }

    /// 1-based terminal position of row `y`, display column `rx`
    pub fn screen_position(&self, y: usize, rx: usize) -> (usize, usize) {
        (
            y.saturating_sub(self.row_offset) + 1,
            rx.saturating_sub(self.col_offset) + 1,
        )
    }
}
