//! Cursor state and navigation
//!
//! The cursor lives in file coordinates: `y` is a row index and `x` a
//! character index into that row's source text. `y` may sit one past the
//! last row, and `x` may sit one past the last character.

use super::buffer::TextBuffer;

/// Direction of a single cursor step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Character index within the row (0-indexed)
    pub x: usize,
    /// Row index (0-indexed)
    pub y: usize,
}

impl Cursor {
    /// Create a cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Move one step in `direction`, then clamp `x` to the new row.
    ///
    /// Left at the start of a row goes to the end of the previous row and
    /// Right at the end of a row goes to the start of the next one. Up and
    /// Down stop at the buffer bounds.
    pub fn step(&mut self, direction: Direction, buffer: &TextBuffer) {
        let on_row = self.y < buffer.len();

        match direction {
            Direction::Left => {
                if self.x > 0 {
                    self.x -= 1;
                } else if self.y > 0 {
                    self.y -= 1;
                    self.x = buffer.row_len(self.y);
                }
            },
            Direction::Right => {
                if on_row {
                    let len = buffer.row_len(self.y);
                    if self.x < len {
                        self.x += 1;
                    } else if self.x == len {
                        self.y += 1;
                        self.x = 0;
                    }
                }
            },
            Direction::Up => {
                self.y = self.y.saturating_sub(1);
            },
            Direction::Down => {
                if self.y < buffer.len() {
                    self.y += 1;
                }
            },
        }

        self.clamp(buffer);
    }

    /// Move `count` steps in `direction`
    pub fn step_by(&mut self, direction: Direction, count: usize, buffer: &TextBuffer) {
        for _ in 0..count {
            self.step(direction, buffer);
        }
    }

    /// Move to the start of the row
    pub fn home(&mut self) {
        self.x = 0;
    }

    /// Move past the last character of the row
    pub fn end(&mut self, buffer: &TextBuffer) {
        self.x = buffer.row_len(self.y);
    }

    /// Pull the cursor back inside the buffer
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.y = self.y.min(buffer.len());
        self.x = self.x.min(buffer.row_len(self.y));
    }
}
