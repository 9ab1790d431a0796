//! Mochi View Library
//!
//! A minimal terminal text viewer that drives the tty directly, without any
//! terminal UI library. This crate provides:
//!
//! - `term`: Raw mode, tty input, window size, termination signals
//! - `input`: Key decoding from the raw byte stream
//! - `core`: Rows, text buffer, cursor navigation, viewport scrolling
//! - `renderer`: Frame composition and escape sequences
//! - `editor`: The viewing session and its quit path
//! - `app`: Configuration and logging

pub mod app;
pub mod core;
pub mod editor;
pub mod input;
pub mod renderer;
pub mod term;

pub use editor::{quit, AppError, Editor, Flow, Outcome};
