//! Raw mode guard
//!
//! Captures the terminal attributes once, switches the line discipline to
//! raw mode and puts the captured attributes back exactly once. Dropping the
//! guard restores the terminal, so early returns and panics are covered too.

use std::io::{self, Stdin};
use std::os::fd::AsFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use super::{TermError, TermResult};

/// Something that can put the terminal back into its original mode
pub trait Restore {
    fn restore(&mut self) -> TermResult<()>;
}

/// RAII guard for raw terminal mode
pub struct RawMode<F: AsFd = Stdin> {
    fd: F,
    original: Termios,
    active: bool,
}

impl RawMode<Stdin> {
    /// Put the process's standard input into raw mode
    pub fn stdin() -> TermResult<Self> {
        Self::enable(io::stdin())
    }
}

impl<F: AsFd> RawMode<F> {
    /// Capture the current attributes of `fd` and switch it to raw mode.
    ///
    /// Nothing is changed on the terminal when this fails.
    pub fn enable(fd: F) -> TermResult<Self> {
        let original = termios::tcgetattr(&fd).map_err(TermError::GetAttr)?;
        let raw = make_raw(&original);

        termios::tcsetattr(&fd, SetArg::TCSANOW, &raw).map_err(TermError::SetAttr)?;
        tracing::debug!("raw mode enabled");

        Ok(Self {
            fd,
            original,
            active: true,
        })
    }

    /// Reapply the captured attributes. Calling this twice is harmless.
    pub fn disable(&mut self) -> TermResult<()> {
        if !self.active {
            return Ok(());
        }
        // A failed restore is not retried.
        self.active = false;
        termios::tcsetattr(&self.fd, SetArg::TCSANOW, &self.original)
            .map_err(TermError::SetAttr)?;
        tracing::debug!("raw mode disabled");
        Ok(())
    }

    /// Whether the terminal is currently in raw mode through this guard
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<F: AsFd> Restore for RawMode<F> {
    fn restore(&mut self) -> TermResult<()> {
        self.disable()
    }
}

impl<F: AsFd> Drop for RawMode<F> {
    fn drop(&mut self) {
        if let Err(e) = self.disable() {
            tracing::warn!("failed to restore terminal on drop: {}", e);
        }
    }
}

/// Derive the raw attribute set from `original`.
///
/// Input translation, output post-processing, canonical mode, echo, signal
/// keys and extended input are switched off; characters are 8 bits wide and
/// a read returns as soon as one byte is available.
pub fn make_raw(original: &Termios) -> Termios {
    let mut raw = original.clone();

    raw.input_flags.remove(
        InputFlags::IGNBRK
            | InputFlags::BRKINT
            | InputFlags::PARMRK
            | InputFlags::ISTRIP
            | InputFlags::INLCR
            | InputFlags::IGNCR
            | InputFlags::ICRNL
            | InputFlags::IXON,
    );
    raw.output_flags.remove(OutputFlags::OPOST);
    raw.local_flags.remove(
        LocalFlags::ECHO
            | LocalFlags::ECHONL
            | LocalFlags::ICANON
            | LocalFlags::ISIG
            | LocalFlags::IEXTEN,
    );
    raw.control_flags.remove(ControlFlags::CSIZE | ControlFlags::PARENB);
    raw.control_flags.insert(ControlFlags::CS8);

    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

    raw
}
