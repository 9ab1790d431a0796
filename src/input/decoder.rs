//! Key decoder
//!
//! Turns a blocking byte stream into [`Key`]s. Recognized sequences:
//!
//! | Bytes after ESC | Key |
//! |-----------------|-----|
//! | `[A` `[B` `[C` `[D` | Up, Down, Right, Left |
//! | `[H` `OH` `[1~` `[7~` | Home |
//! | `[F` `OF` `[4~` `[8~` | End |
//! | `[3~` | Delete |
//! | `[5~` `[6~` | Page Up, Page Down |
//!
//! At most three bytes are read after ESC. Every sequence that does not
//! match, and every read failure, decodes to [`Key::Escape`]. Nothing is
//! buffered between calls.

use std::io::Read;

use super::{Key, ESC};

/// Pull-based decoder over a byte source
#[derive(Debug)]
pub struct KeyDecoder<R> {
    source: R,
}

impl<R: Read> KeyDecoder<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Block until a key is available and decode it
    pub fn read_key(&mut self) -> Key {
        let Some(first) = self.next_byte() else {
            return Key::Escape;
        };

        if first != ESC {
            return Key::Char(first);
        }

        let Some(intro) = self.next_byte() else {
            return Key::Escape;
        };
        let Some(second) = self.next_byte() else {
            return Key::Escape;
        };

        match intro {
            b'[' if second.is_ascii_digit() => match self.next_byte() {
                Some(b'~') => tilde_key(second),
                _ => Key::Escape,
            },
            b'[' => csi_key(second),
            b'O' => ss3_key(second),
            _ => Key::Escape,
        }
    }

    /// Get a mutable reference to the underlying source
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    fn next_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.source.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("key read failed: {}", e);
                None
            },
        }
    }
}

/// `ESC [ <digit> ~`
fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}

/// `ESC [ <letter>`
fn csi_key(letter: u8) -> Key {
    match letter {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

/// `ESC O <letter>`
fn ss3_key(letter: u8) -> Key {
    match letter {
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}
