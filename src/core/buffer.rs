//! Text buffer
//!
//! The loaded file as an ordered list of rows. The buffer is read-only once
//! loaded.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::row::{Row, TAB_STOP};

/// Error type for loading a buffer
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read file: {0}")]
    Read(#[from] io::Error),
}

/// Rows of text in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    rows: Vec<Row>,
    tab_stop: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(TAB_STOP)
    }
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a buffer from already split lines
    pub fn from_lines<I, S>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buffer = Self::new(tab_stop);
        for line in lines {
            buffer.append_row(line);
        }
        buffer
    }

    /// Read `reader` to the end, one row per line.
    ///
    /// Lines end at `\n`; a `\r` right before it is dropped. A final line
    /// without a terminator is kept, an empty one after the last `\n` is
    /// not. Invalid UTF-8 is replaced.
    pub fn from_reader<R: BufRead>(mut reader: R, tab_stop: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::new(tab_stop);
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
            }
            buffer.append_row(String::from_utf8_lossy(&line));
        }

        Ok(buffer)
    }

    /// Load the file at `path`
    pub fn open(path: impl AsRef<Path>, tab_stop: usize) -> Result<Self, BufferError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BufferError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let buffer = Self::from_reader(BufReader::new(file), tab_stop)?;
        tracing::info!("loaded {} rows from {}", buffer.len(), path.display());
        Ok(buffer)
    }

    fn append_row(&mut self, text: impl Into<String>) {
        self.rows.push(Row::new(text, self.tab_stop));
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of row `index` in characters, 0 past the last row
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Row::len)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Display column of character `cx` on row `cy`
    pub fn render_x(&self, cy: usize, cx: usize) -> usize {
        self.rows
            .get(cy)
            .map_or(cx, |row| row.cx_to_rx(cx, self.tab_stop))
    }
}
