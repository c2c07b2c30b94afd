//! Structured error types for sweepctl-core.
//!
//! A failing child process is never an error here: its exit status is the
//! thing being observed. Errors are reserved for the exerciser's own
//! plumbing (config files, spawning the shell, writing the transcript).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sweepctl-core operations
#[derive(Error, Debug)]
pub enum SweepError {
    /// I/O operation failed (usually writing the transcript)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// The shell itself could not be started
    #[error("Failed to spawn `{line}`: {source}")]
    Spawn { line: String, source: io::Error },

    /// Config file parsed but holds unusable values
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Explicitly requested config file is missing
    #[error("Config not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Config file is not valid TOML for `SweepConfig`
    #[error("Invalid config file {path:?}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type alias for sweepctl-core operations
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// Create a spawn error for a command line
    pub fn spawn(line: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            line: line.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a config-not-found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}
