//! Window size detection
//!
//! The size is read with `TIOCGWINSZ`. Some terminals report zero columns;
//! in that case the cursor is pushed to the bottom-right corner and the
//! terminal is asked where it ended up (`CSI 6 n`).

use std::io::{Read, Write};

use nix::errno::Errno;
use nix::libc;
use nix::pty::Winsize;

use super::{TermError, TermResult, WindowSize};

/// Move the cursor far right, then far down
const PROBE_CORNER: &[u8] = b"\x1b[999C\x1b[999B";
/// Device status report: request cursor position
const REQUEST_CURSOR_POSITION: &[u8] = b"\x1b[6n";
/// Longest cursor position report accepted
const MAX_REPORT_LEN: usize = 32;

/// Ask the kernel for the window size of `fd`
pub fn query_winsize(fd: libc::c_int) -> TermResult<WindowSize> {
    let mut ws = Winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ writes a `winsize` into the pointer we pass
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if result < 0 {
        return Err(TermError::WindowSize(Errno::last()));
    }

    Ok(WindowSize::new(ws.ws_row, ws.ws_col))
}

/// Determine the screen size, falling back to the cursor probe when the
/// ioctl fails or reports an empty window.
pub fn window_size<R: Read, W: Write>(input: &mut R, output: &mut W) -> TermResult<WindowSize> {
    match query_winsize(libc::STDOUT_FILENO) {
        Ok(size) if !size.is_empty() => Ok(size),
        Ok(size) => {
            tracing::debug!("TIOCGWINSZ reported {}x{}, probing", size.cols, size.rows);
            probe_cursor_position(input, output)
        },
        Err(e) => {
            tracing::debug!("TIOCGWINSZ failed ({}), probing", e);
            probe_cursor_position(input, output)
        },
    }
}

/// Move the cursor to the far corner and read back its position.
pub fn probe_cursor_position<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
) -> TermResult<WindowSize> {
    output.write_all(PROBE_CORNER)?;
    output.write_all(REQUEST_CURSOR_POSITION)?;
    output.flush()?;

    let mut report = Vec::with_capacity(MAX_REPORT_LEN);
    let mut byte = [0u8; 1];
    while report.len() < MAX_REPORT_LEN {
        match input.read(&mut byte)? {
            0 => break,
            _ => {
                report.push(byte[0]);
                if byte[0] == b'R' {
                    break;
                }
            },
        }
    }

    let size = parse_cursor_report(&report).ok_or(TermError::CursorReport)?;
    if size.is_empty() {
        return Err(TermError::CursorReport);
    }
    Ok(size)
}

/// Parse a cursor position report of exactly the form
/// `ESC '[' digits ';' digits 'R'`.
///
/// Anything else, including trailing bytes, is rejected.
pub fn parse_cursor_report(report: &[u8]) -> Option<WindowSize> {
    let body = report.strip_prefix(b"\x1b[")?.strip_suffix(b"R")?;

    let mut parts = body.splitn(2, |&b| b == b';');
    let rows = parse_decimal(parts.next()?)?;
    let cols = parse_decimal(parts.next()?)?;

    Some(WindowSize::new(rows, cols))
}

fn parse_decimal(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    digits.iter().try_fold(0u16, |acc, &d| {
        acc.checked_mul(10)?.checked_add(u16::from(d - b'0'))
    })
}
