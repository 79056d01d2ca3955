//! lintrelay - runs a Go linter across a cloned repository and republishes
//! the findings.
//!
//! lintrelay is a thin CI orchestrator: it installs a lint tool, clones a
//! target repository, runs the linter, filters the textual output, rewrites
//! local file paths into browsable source links, prints a report, and
//! optionally posts the report as an issue comment.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, resolution, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The sequential lint pipeline
//! - [`shell`] - External command execution with deadline enforcement
//!
//! # Example
//!
//! ```
//! use lintrelay::runner::lint::filter_lines;
//!
//! let lines = ["warning: unused var", "info: fine"];
//! let kept = filter_lines(lines.into_iter(), &["warning:".to_string()], &[]);
//! assert_eq!(kept, vec!["warning: unused var"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;

pub use error::{RelayError, Result};
