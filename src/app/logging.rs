//! Logging setup
//!
//! The terminal is the drawing surface, so log lines never go to stdout or
//! stderr. When a log file is configured, a `tracing` subscriber appends to
//! it; otherwise no subscriber is installed and the macros are no-ops.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a subscriber writing to `path`.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
