//! Error types for lintrelay operations.
//!
//! This module defines [`RelayError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RelayError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RelayError::Other`) for unexpected errors
//! - The skip variant is a soft stop, not a failure: callers log it and exit
//!   zero instead of escalating

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for lintrelay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The cloned repository has no build manifest, so linting is skipped.
    /// Treated as a soft stop: the caller logs and exits cleanly.
    #[error("skip: no build manifest at {path}, not a recognized project")]
    SkipUnsupportedRepo { path: PathBuf },

    /// An external command could not be started.
    #[error("failed to spawn {program}: {source}")]
    CommandSpawn {
        program: String,
        source: std::io::Error,
    },

    /// An external command exited non-zero.
    #[error("run {program} {args:?} failed with exit code {code:?}")]
    CommandFailed {
        program: String,
        args: Vec<String>,
        code: Option<i32>,
    },

    /// An external command outlived the pipeline deadline and was killed.
    #[error("{program} timed out after {timeout:?}")]
    CommandTimedOut { program: String, timeout: Duration },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelayError {
    /// Whether this error is the soft skip condition rather than a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, RelayError::SkipUnsupportedRepo { .. })
    }
}

/// Result type alias for lintrelay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
