//! Unbuffered tty input
//!
//! `std::io::Stdin` reads through an internal buffer. Key decoding and the
//! cursor position probe want every `read` to go straight to the descriptor,
//! so this reader calls `read(2)` directly.

use std::io;
use std::os::fd::BorrowedFd;
use std::os::unix::io::RawFd;

use nix::libc::STDIN_FILENO;
use nix::poll::{poll, PollFd, PollFlags};
use nix::unistd::read;

/// Byte source reading directly from a terminal file descriptor
#[derive(Debug, Clone, Copy)]
pub struct TtyReader {
    fd: RawFd,
    /// Descriptor that becomes readable when the read should give up
    wake: Option<RawFd>,
}

impl TtyReader {
    pub fn new(fd: RawFd) -> Self {
        Self { fd, wake: None }
    }

    /// Reader over the process's standard input
    pub fn stdin() -> Self {
        Self::new(STDIN_FILENO)
    }

    /// Fail reads with `Interrupted` once `wake` is readable
    pub fn with_wake(mut self, wake: RawFd) -> Self {
        self.wake = Some(wake);
        self
    }

    /// Block until the tty has input or the wake descriptor fires
    fn wait(&self, wake: RawFd) -> io::Result<()> {
        // SAFETY: both descriptors outlive the reader
        let tty = unsafe { BorrowedFd::borrow_raw(self.fd) };
        let wake = unsafe { BorrowedFd::borrow_raw(wake) };
        let mut fds = [
            PollFd::new(&tty, PollFlags::POLLIN),
            PollFd::new(&wake, PollFlags::POLLIN),
        ];
        poll(&mut fds, -1).map_err(io::Error::from)?;

        if fds[1].revents().map_or(false, |events| !events.is_empty()) {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        Ok(())
    }
}

impl io::Read for TtyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(wake) = self.wake {
            self.wait(wake)?;
        }
        // EINTR is surfaced so a termination signal can interrupt a blocked read
        read(self.fd, buf).map_err(io::Error::from)
    }
}
