//! Termination signals
//!
//! Raw mode turns off `ISIG`, so Ctrl+C never reaches us as SIGINT. Signals
//! sent from outside (SIGTERM, SIGHUP, SIGQUIT) still arrive and must not
//! leave the terminal in raw mode. The handler records the request and writes
//! a byte to a wake pipe. A reader polling that pipe next to the tty returns
//! even when the signal lands just before it starts waiting, and the main
//! loop goes through the normal quit path.

use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::libc::c_int;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::{pipe, write};

use super::{TermError, TermResult};

static TERMINATE: AtomicBool = AtomicBool::new(false);

/// Write end of the wake pipe, -1 until installed
static WAKE_WRITE: AtomicI32 = AtomicI32::new(-1);
/// Read end of the wake pipe, -1 until installed
static WAKE_READ: AtomicI32 = AtomicI32::new(-1);

extern "C" fn on_terminate(_signal: c_int) {
    TERMINATE.store(true, Ordering::SeqCst);

    let fd = WAKE_WRITE.load(Ordering::SeqCst);
    if fd >= 0 {
        // write(2) is async-signal-safe; a full pipe already wakes readers
        let _ = write(fd, &[1]);
    }
}

/// Install handlers for SIGTERM, SIGHUP and SIGQUIT and return the read end
/// of the wake pipe.
///
/// `SA_RESTART` is not set: a pending `read` fails with `EINTR`. Installing
/// again returns the same pipe.
pub fn install_signal_handlers() -> TermResult<RawFd> {
    let wake = match WAKE_READ.load(Ordering::SeqCst) {
        fd if fd >= 0 => fd,
        _ => {
            let (read_end, write_end) = pipe().map_err(TermError::Signal)?;
            fcntl(write_end, FcntlArg::F_SETFL(OFlag::O_NONBLOCK)).map_err(TermError::Signal)?;
            WAKE_WRITE.store(write_end, Ordering::SeqCst);
            WAKE_READ.store(read_end, Ordering::SeqCst);
            read_end
        },
    };

    let action = SigAction::new(
        SigHandler::Handler(on_terminate),
        SaFlags::empty(),
        SigSet::empty(),
    );

    for signal in [Signal::SIGTERM, Signal::SIGHUP, Signal::SIGQUIT] {
        // SAFETY: the handler only touches atomics and calls write(2)
        unsafe { sigaction(signal, &action) }.map_err(TermError::Signal)?;
    }
    tracing::debug!("termination handlers installed");
    Ok(wake)
}

/// Whether a termination signal has been received
pub fn terminate_requested() -> bool {
    TERMINATE.load(Ordering::SeqCst)
}
