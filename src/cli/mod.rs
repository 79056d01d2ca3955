//! CLI argument definitions.
//!
//! All CLI arguments are defined with clap's derive macros; the main entry
//! point is the [`Cli`] struct. The primary knobs also accept `LINTRELAY_*`
//! environment variables so CI workflows can configure a run without flags.

use crate::config::Overrides;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// lintrelay - runs a Go linter across a cloned repository and republishes
/// the findings.
#[derive(Debug, Parser)]
#[command(name = "lintrelay")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default lintrelay.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the lint pipeline (default if no command specified)
    Run(RunArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Repository URL to clone and lint
    #[arg(long, env = "LINTRELAY_REPO")]
    pub repo: Option<String>,

    /// Working directory the clone lands in
    #[arg(long, env = "LINTRELAY_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Issue number to comment on
    #[arg(long, env = "LINTRELAY_ISSUE")]
    pub issue: Option<u64>,

    /// Post the report as an issue comment
    #[arg(long)]
    pub comment: bool,

    /// Exit non-zero when findings remain after filtering
    #[arg(long)]
    pub exit_fail: bool,

    /// Build the clone before linting
    #[arg(long)]
    pub build: bool,

    /// Overall pipeline budget in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl RunArgs {
    /// Map CLI flags onto config overrides. Boolean flags only override when
    /// given; their absence leaves the file value in place.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            repo: self.repo.clone(),
            workdir: self.workdir.clone(),
            issue: self.issue,
            comment: self.comment.then_some(true),
            exit_fail: self.exit_fail.then_some(true),
            build: self.build.then_some(true),
            timeout_seconds: self.timeout,
        }
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Repository URL to resolve against
    #[arg(long, env = "LINTRELAY_REPO")]
    pub repo: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
