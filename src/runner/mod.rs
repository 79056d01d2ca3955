//! The lint pipeline: prepare, optionally build, lint, rewrite, report,
//! comment.
//!
//! Stages run strictly in sequence; the first failure ends the run. Pipeline
//! failures are logged rather than escalated, so the process still exits
//! zero — the only non-zero path is the exit-on-findings flag.

pub mod build;
pub mod comment;
pub mod lint;
pub mod links;
pub mod prepare;
pub mod report;

pub use prepare::PreparedRepo;

use crate::config::RunConfig;
use crate::error::{RelayError, Result};
use crate::shell::Deadline;
use std::io;
use std::process::ExitCode;

/// Split an argv into program and arguments.
pub(crate) fn split_argv(argv: &[String]) -> Result<(&str, &[String])> {
    match argv.split_first() {
        Some((program, args)) => Ok((program.as_str(), args)),
        None => Err(RelayError::ConfigValidationError {
            message: "command has no executable".to_string(),
        }),
    }
}

/// Run the whole pipeline and decide the process exit code.
///
/// `action_link` is the CI-run URL embedded in the issue comment, resolved
/// by the caller from the environment.
pub fn run_pipeline(cfg: &RunConfig, action_link: &str) -> ExitCode {
    let deadline = Deadline::after(cfg.timeout);

    let prepared = match prepare::prepare(cfg, &deadline) {
        Ok(prepared) => prepared,
        Err(err) if err.is_skip() => {
            tracing::info!("{}", err);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            tracing::error!("failed in prepare linter: {}", err);
            return ExitCode::SUCCESS;
        }
    };

    if cfg.build {
        if let Err(err) = build::build(cfg, &deadline) {
            tracing::error!("failed in build repo: {}", err);
            return ExitCode::SUCCESS;
        }
    }

    let outputs = match lint::run(cfg, &deadline) {
        Ok(outputs) => outputs,
        Err(err) => {
            tracing::error!("failed in run linter: {}", err);
            return ExitCode::SUCCESS;
        }
    };
    if outputs.is_empty() {
        tracing::info!("no valid output after run");
        return ExitCode::SUCCESS;
    }

    let outputs = links::rewrite_links(
        outputs,
        &cfg.repo_dir.to_string_lossy(),
        &prepared.target,
    );

    let mut stdout = io::stdout().lock();
    if let Err(err) = report::print_report(&mut stdout, cfg, &prepared, &outputs) {
        tracing::error!("failed to write report: {}", err);
    }

    if cfg.should_comment() {
        if let Err(err) =
            comment::create_issue_comment(cfg, &prepared, &outputs, action_link, &deadline)
        {
            tracing::error!("failed to create issue comment: {}", err);
            // findings were already reported to stdout, but a failed post
            // skips the exit-on-findings escalation
            return ExitCode::SUCCESS;
        }
    }

    if cfg.exit_fail {
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
