//! Repository preparation: install the linter, clone the target, gate on the
//! build manifest, download dependencies, and discover the branch.

use crate::config::RunConfig;
use crate::error::{RelayError, Result};
use crate::runner::split_argv;
use crate::shell::{self, Deadline};
use std::fs;

/// What preparation discovered about the clone. Immutable once built; every
/// later path rewrite uses this one browse-URL prefix.
#[derive(Debug, Clone)]
pub struct PreparedRepo {
    /// Checked-out branch name.
    pub branch: String,

    /// Remote browse-URL prefix: `<repo>/blob/<branch>`.
    pub target: String,
}

/// Run the preparation chain. Each step is a blocking external process whose
/// combined output is echoed; the first failure short-circuits the rest. A
/// missing build manifest is the distinguished soft-skip condition, not a
/// failure.
pub fn prepare(cfg: &RunConfig, deadline: &Deadline) -> Result<PreparedRepo> {
    // install linter
    let (program, args) = split_argv(&cfg.install)?;
    shell::execute_checked(program, args, Some(&cfg.workdir), deadline)?;

    // fresh clone; drop any leftover from a previous run first
    if cfg.repo_dir.exists() {
        tracing::debug!("removing stale clone at {}", cfg.repo_dir.display());
        fs::remove_dir_all(&cfg.repo_dir)?;
    }
    let mut clone_argv = cfg.clone.clone();
    clone_argv.push(cfg.repo.clone());
    let (program, args) = split_argv(&clone_argv)?;
    shell::execute_checked(program, args, Some(&cfg.workdir), deadline)?;

    // only buildable projects get linted
    let manifest = cfg.repo_dir.join(&cfg.manifest);
    if !manifest.is_file() {
        return Err(RelayError::SkipUnsupportedRepo { path: manifest });
    }

    // download build dependencies
    let (program, args) = split_argv(&cfg.deps)?;
    shell::execute_checked(program, args, Some(&cfg.repo_dir), deadline)?;

    // read the checked-out branch
    let (program, args) = split_argv(&cfg.branch)?;
    let result = shell::execute(program, args, Some(&cfg.repo_dir), deadline)?;
    if !result.success {
        return Err(RelayError::CommandFailed {
            program: program.to_string(),
            args: args.to_vec(),
            code: result.exit_code,
        });
    }
    let branch = result.stdout.trim().to_string();
    let target = format!("{}/blob/{}", cfg.repo, branch);

    Ok(PreparedRepo { branch, target })
}
