//! Viewer session
//!
//! Ties together the key decoder, the text buffer, the cursor and the
//! viewport. The session is an explicit value owned by the caller; every
//! operation takes it by reference.

use std::fmt::Display;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use crate::app::Config;
use crate::core::{BufferError, Cursor, Direction, TextBuffer, Viewport};
use crate::input::{Key, KeyDecoder};
use crate::renderer::{self, compose_frame};
use crate::term::{Restore, TermError, WindowSize};

/// Error type for a viewer run
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Term(#[from] TermError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What the main loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// How the process ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Process exit status
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// A viewing session over one buffer
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    viewport: Viewport,
    quit_key: Key,
}

impl Editor {
    /// Create a session with an empty buffer for a screen of `size`
    pub fn new(config: &Config, size: WindowSize) -> Self {
        Self::with_buffer(TextBuffer::new(config.tab_stop), config, size)
    }

    /// Create a session over an already loaded buffer
    pub fn with_buffer(buffer: TextBuffer, config: &Config, size: WindowSize) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            viewport: Viewport::from_size(size),
            // validate() guarantees an ASCII letter
            quit_key: Key::ctrl(config.quit_key as u8),
        }
    }

    /// Replace the buffer with the contents of `path` and reset the view
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), BufferError> {
        self.buffer = TextBuffer::open(path, self.buffer.tab_stop())?;
        self.cursor = Cursor::new();
        self.viewport.row_offset = 0;
        self.viewport.col_offset = 0;
        Ok(())
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Apply one key to the cursor
    pub fn process_key(&mut self, key: Key) -> Flow {
        if key == self.quit_key {
            return Flow::Quit;
        }

        match key {
            Key::ArrowLeft => self.cursor.step(Direction::Left, &self.buffer),
            Key::ArrowRight => self.cursor.step(Direction::Right, &self.buffer),
            Key::ArrowUp => self.cursor.step(Direction::Up, &self.buffer),
            Key::ArrowDown => self.cursor.step(Direction::Down, &self.buffer),
            Key::PageUp => {
                self.cursor
                    .step_by(Direction::Up, self.viewport.rows, &self.buffer)
            },
            Key::PageDown => {
                self.cursor
                    .step_by(Direction::Down, self.viewport.rows, &self.buffer)
            },
            Key::Home => self.cursor.home(),
            Key::End => self.cursor.end(&self.buffer),
            Key::Delete | Key::Escape | Key::Char(_) => {},
        }
        Flow::Continue
    }

    /// Scroll the viewport so the cursor is on screen
    pub fn scroll(&mut self) {
        self.viewport.scroll(&self.cursor, &self.buffer);
    }

    /// Scroll, then compose the next frame
    pub fn frame(&mut self) -> String {
        self.scroll();
        compose_frame(&self.buffer, &self.viewport, &self.cursor)
    }

    /// Draw the current state to `out`
    pub fn refresh_screen<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let frame = self.frame();
        renderer::write_frame(out, &frame)
    }

    /// Redraw, wait for a key and apply it, until the quit key arrives or
    /// `stop` reports that the session should end.
    pub fn run<R, W, S>(
        &mut self,
        decoder: &mut KeyDecoder<R>,
        out: &mut W,
        stop: S,
    ) -> io::Result<()>
    where
        R: Read,
        W: Write,
        S: Fn() -> bool,
    {
        loop {
            self.refresh_screen(out)?;
            if stop() {
                break;
            }

            // A signal landing before the read blocks still fails it through
            // the reader's wake pipe, and the key decodes as Escape
            let key = decoder.read_key();
            if stop() {
                tracing::info!("termination requested");
                break;
            }

            tracing::trace!("key {:?}", key);
            if self.process_key(key) == Flow::Quit {
                tracing::info!("quit key pressed");
                break;
            }
        }
        Ok(())
    }
}

/// Leave the viewer: erase the screen, home the cursor, make one attempt to
/// restore the terminal, then print `error` if there is one.
pub fn quit<W: Write>(
    out: &mut W,
    mode: Option<&mut dyn Restore>,
    error: Option<&dyn Display>,
) -> Outcome {
    let mut outcome = Outcome::Success;

    if let Err(e) = renderer::clear_screen(out) {
        tracing::warn!("failed to clear screen: {}", e);
    }

    if let Some(mode) = mode {
        if let Err(e) = mode.restore() {
            tracing::error!("{}", e);
            let _ = write!(out, "{}\r\n", e);
            outcome = Outcome::Failure;
        }
    }

    if let Some(error) = error {
        tracing::error!("{}", error);
        let _ = write!(out, "{}\r\n", error);
        outcome = Outcome::Failure;
    }

    let _ = out.flush();
    outcome
}
