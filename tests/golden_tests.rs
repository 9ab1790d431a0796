//! Golden tests for the viewer
//!
//! These tests feed raw key bytes to a session over a known buffer and
//! compare the frame it draws afterwards against the expected screen rows
//! and cursor position.

use std::io::Cursor as ByteSource;

use mochi_view::app::Config;
use mochi_view::core::{TextBuffer, TAB_STOP};
use mochi_view::input::KeyDecoder;
use mochi_view::renderer::{welcome_banner, CLEAR_LINE, CURSOR_HOME, HIDE_CURSOR, SHOW_CURSOR};
use mochi_view::term::WindowSize;
use mochi_view::{Editor, Flow};

/// Screen rows and 1-based cursor position parsed back out of a frame
struct Screen {
    rows: Vec<String>,
    cursor: (usize, usize),
}

fn parse_frame(frame: &str) -> Screen {
    let body = frame
        .strip_prefix(HIDE_CURSOR)
        .and_then(|f| f.strip_prefix(CURSOR_HOME))
        .and_then(|f| f.strip_suffix(SHOW_CURSOR))
        .expect("frame envelope");

    let split = body.rfind("\x1b[").unwrap();
    let (rows, position) = body.split_at(split);

    let position = position
        .strip_prefix("\x1b[")
        .and_then(|p| p.strip_suffix('H'))
        .unwrap();
    let (row, col) = position.split_once(';').unwrap();

    Screen {
        rows: rows
            .split("\r\n")
            .map(|row| row.strip_suffix(CLEAR_LINE).unwrap().to_string())
            .collect(),
        cursor: (row.parse().unwrap(), col.parse().unwrap()),
    }
}

/// Helper to run a golden test
fn run_golden_test(lines: &[&str], input: &[u8], rows: u16, cols: u16) -> (Editor, Screen) {
    let buffer = TextBuffer::from_lines(lines.iter().copied(), TAB_STOP);
    let mut editor = Editor::with_buffer(buffer, &Config::default(), WindowSize::new(rows, cols));

    let len = input.len() as u64;
    let mut decoder = KeyDecoder::new(ByteSource::new(input.to_vec()));
    let mut frame = editor.frame();
    while decoder.source_mut().position() < len {
        if editor.process_key(decoder.read_key()) == Flow::Quit {
            break;
        }
        // Redraw after every key, as the main loop does
        frame = editor.frame();
    }

    let screen = parse_frame(&frame);
    (editor, screen)
}

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("line {}", i)).collect()
}

// ============================================================================
// Empty buffer
// ============================================================================

#[test]
fn test_welcome_screen() {
    let (_, screen) = run_golden_test(&[], b"", 24, 80);

    assert_eq!(screen.rows.len(), 24);
    assert_eq!(screen.rows[8], welcome_banner(80));
    assert!(screen.rows[8].trim_start_matches(['~', ' ']).starts_with("text editor -- version"));
    for (y, row) in screen.rows.iter().enumerate() {
        if y != 8 {
            assert_eq!(row, "~", "row {}", y);
        }
    }
    assert_eq!(screen.cursor, (1, 1));
}

#[test]
fn test_welcome_screen_narrow() {
    let (_, screen) = run_golden_test(&[], b"", 6, 12);

    assert_eq!(screen.rows[2], "text editor ");
}

#[test]
fn test_keys_on_empty_buffer() {
    let (editor, screen) = run_golden_test(&[], b"\x1b[B\x1b[C\x1b[6~\x1b[F", 24, 80);

    assert_eq!(editor.cursor().x, 0);
    assert_eq!(editor.cursor().y, 0);
    assert_eq!(screen.cursor, (1, 1));
}

// ============================================================================
// Cursor movement
// ============================================================================

#[test]
fn test_arrow_navigation() {
    let (_, screen) = run_golden_test(&["hello", "world"], b"\x1b[C\x1b[C\x1b[B", 24, 80);

    assert_eq!(screen.rows[0], "hello");
    assert_eq!(screen.rows[1], "world");
    assert_eq!(screen.rows[2], "~");
    assert_eq!(screen.cursor, (2, 3));
}

#[test]
fn test_right_wraps_to_next_line() {
    let (_, screen) = run_golden_test(&["ab", "cd"], b"\x1b[C\x1b[C\x1b[C", 24, 80);
    assert_eq!(screen.cursor, (2, 1));
}

#[test]
fn test_left_wraps_to_previous_line() {
    let (_, screen) = run_golden_test(&["abc", "d"], b"\x1b[B\x1b[D", 24, 80);
    assert_eq!(screen.cursor, (1, 4));
}

#[test]
fn test_ss3_home_and_csi_end() {
    let (editor, _) = run_golden_test(&["some text"], b"\x1b[F", 24, 80);
    assert_eq!(editor.cursor().x, 9);

    let (editor, _) = run_golden_test(&["some text"], b"\x1b[F\x1bOH", 24, 80);
    assert_eq!(editor.cursor().x, 0);
}

#[test]
fn test_literal_keys_do_nothing() {
    let (editor, _) = run_golden_test(&["text"], b"jjkl\x1b[3~", 24, 80);
    assert_eq!(editor.cursor().x, 0);
    assert_eq!(editor.cursor().y, 0);
}

#[test]
fn test_quit_stops_processing() {
    let (editor, _) = run_golden_test(&["a", "b", "c"], b"\x1b[B\x11\x1b[B", 24, 80);
    assert_eq!(editor.cursor().y, 1);
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_vertical_scroll() {
    let lines = numbered(30);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    // Eleven downs on a ten-row screen scroll by two rows
    let input = b"\x1b[B".repeat(11);
    let (editor, screen) = run_golden_test(&refs, &input, 10, 80);

    assert_eq!(editor.viewport().row_offset, 2);
    assert_eq!(screen.rows[0], "line 2");
    assert_eq!(screen.rows[9], "line 11");
    assert_eq!(screen.cursor, (10, 1));
}

#[test]
fn test_page_down_then_up() {
    let lines = numbered(100);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let (editor, screen) = run_golden_test(&refs, b"\x1b[6~\x1b[6~", 10, 80);
    assert_eq!(editor.cursor().y, 20);
    assert_eq!(screen.rows[9], "line 20");

    let (editor, screen) = run_golden_test(&refs, b"\x1b[6~\x1b[6~\x1b[5~", 10, 80);
    assert_eq!(editor.cursor().y, 10);
    assert_eq!(screen.rows[0], "line 10");
    assert_eq!(screen.cursor, (1, 1));
}

#[test]
fn test_page_down_past_end() {
    let (editor, screen) = run_golden_test(&["a", "b", "c"], b"\x1b[6~", 10, 80);

    assert_eq!(editor.cursor().y, 3);
    assert_eq!(screen.rows[3], "~");
    assert_eq!(screen.cursor, (4, 1));
}

#[test]
fn test_horizontal_scroll() {
    let line = "0123456789abcdefghij";
    let (editor, screen) = run_golden_test(&[line], b"\x1b[F", 3, 10);

    // Cursor sits after the last character, column 20
    assert_eq!(editor.viewport().col_offset, 11);
    assert_eq!(screen.rows[0], "bcdefghij");
    assert_eq!(screen.cursor, (1, 10));
}

#[test]
fn test_horizontal_scroll_back() {
    let line = "0123456789abcdefghij";
    let (editor, screen) = run_golden_test(&[line], b"\x1b[F\x1b[H", 3, 10);

    assert_eq!(editor.viewport().col_offset, 0);
    assert_eq!(screen.rows[0], "0123456789");
    assert_eq!(screen.cursor, (1, 1));
}

#[test]
fn test_scroll_with_tabs() {
    let (editor, screen) = run_golden_test(&["\t\tend"], b"\x1b[C\x1b[C", 3, 10);

    // Two tabs put the cursor at display column 16
    assert_eq!(editor.viewport().col_offset, 7);
    assert_eq!(screen.rows[0], "         e");
    assert_eq!(screen.cursor, (1, 10));
}

// ============================================================================
// Wide glyphs
// ============================================================================

#[test]
fn test_wide_glyphs_on_narrow_screen() {
    let line = "漢".repeat(50);
    let (_, screen) = run_golden_test(&[&line], b"", 3, 9);

    // Four glyphs fill eight columns; a fifth would overflow
    assert_eq!(screen.rows[0], "漢".repeat(4));
    assert_eq!(screen.cursor, (1, 1));
}

#[test]
fn test_horizontal_scroll_over_wide_glyphs() {
    let line = "漢".repeat(10);
    let (editor, screen) = run_golden_test(&[&line], b"\x1b[F", 3, 10);

    // End puts the cursor at display column 20
    assert_eq!(editor.viewport().col_offset, 11);
    assert_eq!(screen.rows[0], format!(" {}", "漢".repeat(4)));
    assert_eq!(screen.cursor, (1, 10));
}

#[test]
fn test_control_bytes_in_file_are_not_sent() {
    let (_, screen) = run_golden_test(&["x\x1b[2Jy\x07"], b"", 3, 20);
    assert_eq!(screen.rows[0], "x?[2Jy?");
}
