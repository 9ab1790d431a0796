//! Text rows
//!
//! A row is one line of the loaded file together with the form it is drawn
//! in. Tabs are expanded to spaces up to the next tab stop and control
//! characters are drawn as `?`; everything else is copied through. Columns
//! are terminal cells, so a wide glyph counts twice.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

/// Default distance between tab stops
pub const TAB_STOP: usize = 8;

/// Drawn in place of a control character
pub const CONTROL_PLACEHOLDER: char = '?';

/// One line of text and its display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Source text, without the line terminator
    chars: String,
    /// `chars` with tabs expanded and control characters replaced
    render: String,
    /// Length of `chars` in characters
    len: usize,
    /// Width of `render` in terminal columns
    render_len: usize,
}

impl Row {
    /// Build a row from source text, expanding tabs to `tab_stop` columns
    pub fn new(text: impl Into<String>, tab_stop: usize) -> Self {
        let mut row = Self {
            chars: text.into(),
            render: String::new(),
            len: 0,
            render_len: 0,
        };
        row.update(tab_stop);
        row
    }

    /// Recompute the display form from the source text
    pub fn update(&mut self, tab_stop: usize) {
        self.render = render_line(&self.chars, tab_stop);
        self.len = self.chars.chars().count();
        self.render_len = self.render.chars().map(char_width).sum();
    }

    /// Source text
    pub fn chars(&self) -> &str {
        &self.chars
    }

    /// Display text
    pub fn render(&self) -> &str {
        &self.render
    }

    /// Number of characters in the source text
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Width of the display text in columns
    pub fn render_len(&self) -> usize {
        self.render_len
    }

    /// Map a character index in the source text to a display column.
    ///
    /// Indices past the end continue one column per character.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        let mut seen = 0;
        for c in self.chars.chars().take(cx) {
            if c == '\t' {
                rx += tab_stop - (rx % tab_stop);
            } else {
                rx += char_width(c);
            }
            seen += 1;
        }
        rx + (cx - seen)
    }

    /// The part of the display text that falls in columns
    /// `offset..offset + width`.
    ///
    /// A wide glyph cut by the right edge is left out. One cut by the left
    /// edge is replaced by spaces for the columns that remain visible.
    pub fn visible(&self, offset: usize, width: usize) -> Cow<'_, str> {
        let limit = offset + width;
        let mut col = 0;
        let mut start = None;
        let mut end = self.render.len();
        let mut lead = 0;

        for (i, c) in self.render.char_indices() {
            let w = char_width(c);
            if start.is_none() {
                if col >= offset {
                    start = Some(i);
                } else if col + w > offset {
                    lead = (col + w - offset).min(width);
                }
            }
            if start.is_some() && col + w > limit {
                end = i;
                break;
            }
            col += w;
        }

        let shown = start.map_or("", |start| &self.render[start..end]);
        if lead == 0 {
            Cow::Borrowed(shown)
        } else {
            Cow::Owned(format!("{:lead$}{}", "", shown, lead = lead))
        }
    }
}

/// Columns taken by `c` once drawn. Control characters are drawn as the
/// one-column placeholder.
fn char_width(c: char) -> usize {
    if c.is_control() {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

/// Build the display form of `line`: every tab becomes at least one space,
/// stopping at the next multiple of `tab_stop`, and every other control
/// character becomes [`CONTROL_PLACEHOLDER`].
pub fn render_line(line: &str, tab_stop: usize) -> String {
    let tab_stop = tab_stop.max(1);
    let mut out = String::with_capacity(line.len());
    let mut col = 0;

    for c in line.chars() {
        if c == '\t' {
            out.push(' ');
            col += 1;
            while col % tab_stop != 0 {
                out.push(' ');
                col += 1;
            }
        } else if c.is_control() {
            out.push(CONTROL_PLACEHOLDER);
            col += 1;
        } else {
            out.push(c);
            col += char_width(c);
        }
    }
    out
}
