//! Frame composition
//!
//! One pass over the screen rows, top to bottom. Rows inside the buffer show
//! the visible slice of their display text; rows past the end show `~`,
//! except that an empty buffer gets a welcome line a third of the way down.

use std::fmt::Write;

use super::{
    cursor_position, CLEAR_LINE, CURSOR_HOME, EMPTY_ROW_MARKER, HIDE_CURSOR, ROW_SEPARATOR,
    SHOW_CURSOR,
};
use crate::core::{Cursor, TextBuffer, Viewport};

/// Text of the welcome line
pub const WELCOME: &str = concat!("text editor -- version ", env!("CARGO_PKG_VERSION"));

/// Compose the full frame: hide cursor, home, rows, cursor position, show
/// cursor.
///
/// The viewport is expected to have been scrolled to the cursor already.
pub fn compose_frame(buffer: &TextBuffer, viewport: &Viewport, cursor: &Cursor) -> String {
    let mut frame = String::with_capacity(viewport.rows * (viewport.cols + 8) + 32);

    frame.push_str(HIDE_CURSOR);
    frame.push_str(CURSOR_HOME);

    draw_rows(&mut frame, buffer, viewport);

    let rx = buffer.render_x(cursor.y, cursor.x);
    let (row, col) = viewport.screen_position(cursor.y, rx);
    frame.push_str(&cursor_position(row, col));

    frame.push_str(SHOW_CURSOR);
    frame
}

fn draw_rows(frame: &mut String, buffer: &TextBuffer, viewport: &Viewport) {
    let welcome_row = viewport.rows / 3;

    for y in 0..viewport.rows {
        let file_row = y + viewport.row_offset;

        match buffer.row(file_row) {
            Some(row) => frame.push_str(&row.visible(viewport.col_offset, viewport.cols)),
            None if buffer.is_empty() && y == welcome_row => {
                frame.push_str(&welcome_banner(viewport.cols));
            },
            None => frame.push(EMPTY_ROW_MARKER),
        }

        frame.push_str(CLEAR_LINE);
        if y + 1 < viewport.rows {
            frame.push_str(ROW_SEPARATOR);
        }
    }
}

/// The welcome line for a screen `cols` wide: the message truncated to fit
/// and centered, with the row marker as the first padding character.
pub fn welcome_banner(cols: usize) -> String {
    let message: String = WELCOME.chars().take(cols).collect();
    let mut padding = (cols - message.chars().count()) / 2;

    let mut line = String::with_capacity(cols);
    if padding > 0 {
        line.push(EMPTY_ROW_MARKER);
        padding -= 1;
    }
    // Writing to a String cannot fail
    let _ = write!(line, "{:padding$}{}", "", message, padding = padding);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TAB_STOP;

    fn body_rows(frame: &str) -> Vec<&str> {
        let start = HIDE_CURSOR.len() + CURSOR_HOME.len();
        let end = frame.rfind("\x1b[?25h").unwrap();
        let body = &frame[start..end];
        let body = &body[..body.rfind(CLEAR_LINE).unwrap() + CLEAR_LINE.len()];
        body.split(ROW_SEPARATOR)
            .map(|row| row.strip_suffix(CLEAR_LINE).unwrap())
            .collect()
    }

    #[test]
    fn test_welcome_banner_centered() {
        let banner = welcome_banner(80);
        let padding = (80 - WELCOME.len()) / 2;

        assert!(banner.starts_with('~'));
        assert_eq!(banner.len(), padding + WELCOME.len());
        assert!(banner.ends_with(WELCOME));
        assert_eq!(&banner[1..padding], " ".repeat(padding - 1));
    }

    #[test]
    fn test_welcome_banner_truncated() {
        let banner = welcome_banner(10);
        assert_eq!(banner, "text edito");
    }

    #[test]
    fn test_welcome_banner_one_column_spare() {
        let cols = WELCOME.len() + 1;
        // Padding rounds down to zero: no marker
        assert_eq!(welcome_banner(cols), WELCOME);
    }

    #[test]
    fn test_empty_buffer_frame() {
        let buffer = TextBuffer::default();
        let viewport = Viewport::new(24, 80);
        let frame = compose_frame(&buffer, &viewport, &Cursor::new());

        let rows = body_rows(&frame);
        assert_eq!(rows.len(), 24);
        for (y, row) in rows.iter().enumerate() {
            if y == 8 {
                assert_eq!(*row, welcome_banner(80));
            } else {
                assert_eq!(*row, "~");
            }
        }
    }

    #[test]
    fn test_frame_envelope() {
        let buffer = TextBuffer::from_lines(["hi"], TAB_STOP);
        let viewport = Viewport::new(2, 10);
        let frame = compose_frame(&buffer, &viewport, &Cursor { x: 1, y: 0 });

        assert_eq!(
            frame,
            "\x1b[?25l\x1b[Hhi\x1b[K\r\n~\x1b[K\x1b[1;2H\x1b[?25h"
        );
    }

    #[test]
    fn test_rows_are_truncated_to_width() {
        let buffer = TextBuffer::from_lines(["abcdefghij"], TAB_STOP);
        let viewport = Viewport::new(1, 4);
        let frame = compose_frame(&buffer, &viewport, &Cursor::new());

        assert_eq!(body_rows(&frame), vec!["abcd"]);
    }

    #[test]
    fn test_rows_start_at_column_offset() {
        let buffer = TextBuffer::from_lines(["abcdefghij", "xy"], TAB_STOP);
        let mut viewport = Viewport::new(2, 4);
        viewport.col_offset = 3;
        let frame = compose_frame(&buffer, &viewport, &Cursor { x: 5, y: 0 });

        assert_eq!(body_rows(&frame), vec!["defg", ""]);
        assert!(frame.contains("\x1b[1;3H"));
    }

    #[test]
    fn test_rows_start_at_row_offset() {
        let buffer = TextBuffer::from_lines(["one", "two", "three"], TAB_STOP);
        let mut viewport = Viewport::new(3, 10);
        viewport.row_offset = 1;
        let frame = compose_frame(&buffer, &viewport, &Cursor { x: 0, y: 2 });

        // Non-empty buffer: no welcome line past the end
        assert_eq!(body_rows(&frame), vec!["two", "three", "~"]);
        assert!(frame.contains("\x1b[2;1H"));
    }

    #[test]
    fn test_wide_row_fits_screen_width() {
        let buffer = TextBuffer::from_lines(["漢".repeat(50)], TAB_STOP);
        let viewport = Viewport::new(1, 80);
        let frame = compose_frame(&buffer, &viewport, &Cursor::new());

        assert_eq!(body_rows(&frame), vec!["漢".repeat(40)]);
    }

    #[test]
    fn test_cursor_after_wide_glyphs() {
        let buffer = TextBuffer::from_lines(["漢字x"], TAB_STOP);
        let viewport = Viewport::new(1, 20);
        let frame = compose_frame(&buffer, &viewport, &Cursor { x: 2, y: 0 });

        assert!(frame.contains("\x1b[1;5H"));
    }

    #[test]
    fn test_escape_in_file_is_not_sent() {
        let buffer = TextBuffer::from_lines(["a\x1b[2Jb"], TAB_STOP);
        let viewport = Viewport::new(1, 20);
        let frame = compose_frame(&buffer, &viewport, &Cursor::new());

        assert_eq!(body_rows(&frame), vec!["a?[2Jb"]);
        assert!(!frame.contains("\x1b[2J"));
    }

    #[test]
    fn test_tabs_are_expanded_in_frame() {
        let buffer = TextBuffer::from_lines(["\tx"], TAB_STOP);
        let viewport = Viewport::new(1, 20);
        let frame = compose_frame(&buffer, &viewport, &Cursor { x: 1, y: 0 });

        assert_eq!(body_rows(&frame), vec!["        x"]);
        assert!(!frame.contains('\t'));
        assert!(frame.contains("\x1b[1;9H"));
    }
}
