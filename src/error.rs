//! Error types for scriptkit
//!
//! Domain-specific error types using thiserror.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stream resolution errors
#[derive(Error, Debug)]
pub enum StreamError {
    /// Mode is neither read nor write
    #[error("No mode '{mode}' for file (expected 'r' or 'w')")]
    InvalidMode { mode: String },

    /// Standard stream used against its direction
    #[error("Cannot open {target} for {mode}")]
    Direction { target: String, mode: String },

    /// Failed to open a file target
    #[error("Failed to open '{path}'")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure while the handle was in use
    #[error("I/O error on {target}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Settings file errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse settings file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Logger configuration errors
#[derive(Error, Debug)]
pub enum LoggerError {
    /// Log file could not be opened
    #[error("Failed to open log file '{path}'")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised by the run harness before the main routine starts
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Settings error
    #[error("Settings error")]
    Settings(#[from] SettingsError),

    /// Logger error
    #[error("Logger error")]
    Logger(#[from] LoggerError),

    /// Interrupt handler could not be installed
    #[error("Failed to install interrupt handler")]
    Interrupt {
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_message_names_mode() {
        let err = StreamError::InvalidMode {
            mode: "a+".to_string(),
        };
        assert!(err.to_string().contains("a+"));
    }

    #[test]
    fn test_harness_error_wraps_settings_error() {
        let err: HarnessError = SettingsError::ParseError {
            path: "config.toml".to_string(),
            error: "expected `=`".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Settings error");
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("config.toml"));
    }

    #[test]
    fn test_io_cause_is_reported_once_in_chain() {
        let err = anyhow::Error::new(StreamError::Io {
            target: "standard input".to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, "bad bytes"),
        });
        let chain = format!("{err:#}");
        assert_eq!(chain, "I/O error on standard input: bad bytes");
        assert_eq!(chain.matches("bad bytes").count(), 1);
    }
}
