//! Optional pre-lint build, to surface compile failures before lint output
//! is trusted.

use crate::config::RunConfig;
use crate::error::Result;
use crate::runner::split_argv;
use crate::shell::{self, Deadline};

/// Compile the clone with the configured build command. Non-zero exit is a
/// hard error.
pub fn build(cfg: &RunConfig, deadline: &Deadline) -> Result<()> {
    let (program, args) = split_argv(&cfg.build_command)?;
    shell::execute_checked(program, args, Some(&cfg.repo_dir), deadline)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::sample_run_config;
    use crate::error::RelayError;
    use tempfile::TempDir;

    #[test]
    fn build_succeeds_with_passing_command() {
        let temp = TempDir::new().unwrap();
        let mut cfg = sample_run_config();
        cfg.repo_dir = temp.path().to_path_buf();
        cfg.build_command = vec!["true".into()];

        assert!(build(&cfg, &Deadline::default()).is_ok());
    }

    #[test]
    fn build_errors_on_failing_command() {
        let temp = TempDir::new().unwrap();
        let mut cfg = sample_run_config();
        cfg.repo_dir = temp.path().to_path_buf();
        cfg.build_command = vec!["false".into()];

        let err = build(&cfg, &Deadline::default()).unwrap_err();
        assert!(matches!(err, RelayError::CommandFailed { .. }));
    }
}
