//! Configuration for the viewer
//!
//! Settings come from, in increasing priority:
//! - built-in defaults
//! - a JSON config file
//! - `MOCHI_VIEW_*` environment variables
//! - command line arguments

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::core::TAB_STOP;
use crate::term::WindowSize;

/// Largest accepted tab stop
const MAX_TAB_STOP: usize = 32;

/// CLI arguments for the viewer
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mochi-view")]
#[command(version)]
#[command(about = "A minimal raw-mode terminal text viewer", long_about = None)]
pub struct CliArgs {
    /// File to view
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Distance between tab stops
    #[arg(long, value_name = "N")]
    pub tab_stop: Option<usize>,

    /// Override the detected number of screen rows
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<u16>,

    /// Override the detected number of screen columns
    #[arg(long, value_name = "COLS")]
    pub cols: Option<u16>,

    /// Write log output to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Distance between tab stops
    pub tab_stop: usize,
    /// Letter that quits when pressed with Ctrl
    pub quit_key: char,
    /// Fixed screen height instead of the detected one
    pub rows: Option<u16>,
    /// Fixed screen width instead of the detected one
    pub cols: Option<u16>,
    /// Where tracing output goes; nothing is logged without it
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: TAB_STOP,
            quit_key: 'q',
            rows: None,
            cols: None,
            log_file: None,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = args.config.clone().or_else(Self::default_config_path);
        if let Some(path) = &config_path {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(file_config) => config = file_config,
                    Err(e) => {
                        // Logging is not up yet; the file is skipped
                        eprintln!("Ignoring config file {}: {}", path.display(), e);
                    },
                }
            }
        }

        config.apply_env_vars();
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/mochi-view/config.json`, else
    /// `~/.config/mochi-view/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        let base = env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("mochi-view").join("config.json"))
    }

    fn apply_env_vars(&mut self) {
        self.apply_env(|name| env::var(name).ok());
    }

    /// Apply `MOCHI_VIEW_*` variables looked up through `lookup`
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("MOCHI_VIEW_TAB_STOP") {
            if let Ok(tab_stop) = val.parse() {
                self.tab_stop = tab_stop;
            }
        }
        if let Some(val) = lookup("MOCHI_VIEW_LOG_FILE") {
            if !val.is_empty() {
                self.log_file = Some(PathBuf::from(val));
            }
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(tab_stop) = args.tab_stop {
            self.tab_stop = tab_stop;
        }
        if let Some(rows) = args.rows {
            self.rows = Some(rows);
        }
        if let Some(cols) = args.cols {
            self.cols = Some(cols);
        }
        if let Some(path) = &args.log_file {
            self.log_file = Some(path.clone());
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_stop == 0 || self.tab_stop > MAX_TAB_STOP {
            return Err(ConfigError::Invalid {
                field: "tab_stop",
                message: format!("must be between 1 and {}", MAX_TAB_STOP),
            });
        }
        if !self.quit_key.is_ascii_alphabetic() {
            return Err(ConfigError::Invalid {
                field: "quit_key",
                message: format!("{:?} is not an ASCII letter", self.quit_key),
            });
        }
        if self.rows == Some(0) {
            return Err(ConfigError::Invalid {
                field: "rows",
                message: "must be non-zero".to_string(),
            });
        }
        if self.cols == Some(0) {
            return Err(ConfigError::Invalid {
                field: "cols",
                message: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// The fixed window size, when both dimensions are configured
    pub fn fixed_size(&self) -> Option<WindowSize> {
        Some(WindowSize::new(self.rows?, self.cols?))
    }

    /// Replace the detected dimensions with any configured ones
    pub fn override_size(&self, detected: WindowSize) -> WindowSize {
        WindowSize::new(
            self.rows.unwrap_or(detected.rows),
            self.cols.unwrap_or(detected.cols),
        )
    }
}
