//! Mochi View
//!
//! A minimal raw-mode terminal text viewer.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use mochi_view::app::{logging, CliArgs, Config};
use mochi_view::input::KeyDecoder;
use mochi_view::term::{
    install_signal_handlers, terminate_requested, window_size, RawMode, TtyReader,
};
use mochi_view::{quit, AppError, Editor};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Load configuration with precedence: CLI > env > file > defaults
    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    if let Some(path) = &config.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
    info!("mochi-view {} starting", env!("CARGO_PKG_VERSION"));

    let mut out = io::stdout().lock();

    let mut raw = match RawMode::stdin() {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to enter raw mode: {}", e);
            return quit(&mut out, None, Some(&e)).into();
        },
    };

    let outcome = match run(&args, &config, &mut out) {
        Ok(()) => quit(&mut out, Some(&mut raw), None),
        Err(e) => quit(&mut out, Some(&mut raw), Some(&e)),
    };

    info!("mochi-view exiting ({:?})", outcome);
    outcome.into()
}

fn run<W: Write>(args: &CliArgs, config: &Config, out: &mut W) -> Result<(), AppError> {
    let mut input = TtyReader::stdin();
    match install_signal_handlers() {
        Ok(wake) => input = input.with_wake(wake),
        Err(e) => warn!("{}", e),
    }

    let size = match config.fixed_size() {
        Some(size) => size,
        None => config.override_size(window_size(&mut input, out)?),
    };
    info!("screen is {}x{}", size.cols, size.rows);

    let mut editor = Editor::new(config, size);
    if let Some(path) = &args.file {
        if let Err(e) = editor.open(path) {
            warn!("{}", e);
        }
    }

    let mut decoder = KeyDecoder::new(input);
    editor.run(&mut decoder, out, terminate_requested)?;
    Ok(())
}
