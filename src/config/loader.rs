//! Configuration discovery, loading, and resolution.
//!
//! File values are overlaid with CLI flags, then validated and resolved into
//! the read-only [`RunConfig`] the pipeline consumes.

use crate::config::schema::{repo_dir_name, RelayConfig, RunConfig};
use crate::error::{RelayError, Result};
use crate::shell::DEFAULT_TIMEOUT;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file names probed in the working directory, in order.
const CONFIG_NAMES: &[&str] = &["lintrelay.yml", "lintrelay.yaml"];

/// Values the CLI may override on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repo: Option<String>,
    pub workdir: Option<PathBuf>,
    pub issue: Option<u64>,
    pub comment: Option<bool>,
    pub exit_fail: Option<bool>,
    pub build: Option<bool>,
    pub timeout_seconds: Option<u64>,
}

/// Find a config file in `start`, probing the well-known names.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|name| start.join(name))
        .find(|path| path.is_file())
}

/// Read and parse a config file.
pub fn load_file(path: &Path) -> Result<RelayConfig> {
    if !path.is_file() {
        return Err(RelayError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    serde_yaml::from_str(&raw).map_err(|e| RelayError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration for a run: explicit `--config` path, or a discovered
/// file, or defaults when neither exists (validation then reports what is
/// missing), overlaid with CLI values.
pub fn load(config_path: Option<&Path>, start: &Path, overrides: &Overrides) -> Result<RunConfig> {
    let file_cfg = match config_path {
        Some(path) => load_file(path)?,
        None => match find_config(start) {
            Some(path) => {
                tracing::debug!("using config file {}", path.display());
                load_file(&path)?
            }
            None => RelayConfig::default(),
        },
    };
    resolve(file_cfg, start, overrides)
}

/// Overlay, validate, and resolve into a [`RunConfig`].
pub fn resolve(cfg: RelayConfig, start: &Path, overrides: &Overrides) -> Result<RunConfig> {
    let repo = overrides
        .repo
        .clone()
        .unwrap_or(cfg.repo)
        .trim()
        .to_string();
    if repo.is_empty() {
        return Err(validation("repo is required (config `repo` or --repo)"));
    }

    let lint = cfg.linter_command.to_argv();
    if lint.is_empty() {
        return Err(validation("linter_command is required"));
    }
    let install = cfg.install_command.to_argv();
    if install.is_empty() {
        return Err(validation("install_command is required"));
    }

    let timeout_seconds = overrides
        .timeout_seconds
        .or(cfg.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT.as_secs());
    if timeout_seconds == 0 {
        return Err(validation("timeout_seconds must be greater than zero"));
    }

    let workdir = overrides
        .workdir
        .clone()
        .or(cfg.workdir)
        .unwrap_or_else(|| start.to_path_buf());
    let repo_dir = workdir.join(repo_dir_name(&repo));

    Ok(RunConfig {
        repo_dir,
        install,
        lint,
        clone: cfg.commands.clone.to_argv(),
        branch: cfg.commands.branch.to_argv(),
        deps: cfg.commands.deps.to_argv(),
        build_command: cfg.commands.build.to_argv(),
        comment_command: cfg.commands.comment.to_argv(),
        includes: cfg.includes,
        excludes: cfg.excludes,
        build: overrides.build.unwrap_or(cfg.build),
        collect_stderr: cfg.collect_stderr,
        exit_fail: overrides.exit_fail.unwrap_or(cfg.exit_fail),
        issue_id: overrides.issue.or(cfg.issue.id),
        comment: overrides.comment.unwrap_or(cfg.issue.comment),
        timeout: Duration::from_secs(timeout_seconds),
        manifest: cfg.manifest,
        repo,
        workdir,
    })
}

fn validation(message: &str) -> RelayError {
    RelayError::ConfigValidationError {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
repo: https://github.com/org/repo
install_command: go install example.com/lint@latest
linter_command: mylint
"#;

    #[test]
    fn find_config_probes_both_names() {
        let temp = TempDir::new().unwrap();
        assert!(find_config(temp.path()).is_none());

        fs::write(temp.path().join("lintrelay.yaml"), MINIMAL).unwrap();
        let found = find_config(temp.path()).unwrap();
        assert!(found.ends_with("lintrelay.yaml"));

        fs::write(temp.path().join("lintrelay.yml"), MINIMAL).unwrap();
        let found = find_config(temp.path()).unwrap();
        assert!(found.ends_with("lintrelay.yml"));
    }

    #[test]
    fn load_file_reports_missing_path() {
        let err = load_file(Path::new("/nope/lintrelay.yml")).unwrap_err();
        assert!(matches!(err, RelayError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_file_reports_parse_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lintrelay.yml");
        fs::write(&path, "repo: [unclosed").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, RelayError::ConfigParseError { .. }));
    }

    #[test]
    fn resolve_fills_defaults_and_repo_dir() {
        let cfg: RelayConfig = serde_yaml::from_str(MINIMAL).unwrap();
        let resolved = resolve(cfg, Path::new("/work"), &Overrides::default()).unwrap();
        assert_eq!(resolved.workdir, Path::new("/work"));
        assert_eq!(resolved.repo_dir, Path::new("/work/repo"));
        assert_eq!(resolved.timeout, Duration::from_secs(600));
        assert_eq!(resolved.clone, vec!["git", "clone"]);
        assert_eq!(resolved.manifest, "go.mod");
        assert!(!resolved.should_comment());
    }

    #[test]
    fn resolve_rejects_missing_repo() {
        let cfg: RelayConfig = serde_yaml::from_str("linter_command: mylint").unwrap();
        let err = resolve(cfg, Path::new("/work"), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("repo is required"));
    }

    #[test]
    fn resolve_rejects_missing_linter_command() {
        let cfg: RelayConfig =
            serde_yaml::from_str("repo: https://github.com/org/repo").unwrap();
        let err = resolve(cfg, Path::new("/work"), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("linter_command"));
    }

    #[test]
    fn resolve_rejects_zero_timeout() {
        let cfg: RelayConfig = serde_yaml::from_str(MINIMAL).unwrap();
        let overrides = Overrides {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        let err = resolve(cfg, Path::new("/work"), &overrides).unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let cfg: RelayConfig = serde_yaml::from_str(
            r#"
repo: https://github.com/org/repo
install_command: ["true"]
linter_command: mylint
exit_fail: false
issue:
  id: 1
"#,
        )
        .unwrap();
        let overrides = Overrides {
            repo: Some("https://github.com/other/thing.git".into()),
            workdir: Some(PathBuf::from("/scratch")),
            issue: Some(99),
            comment: Some(true),
            exit_fail: Some(true),
            timeout_seconds: Some(30),
            ..Default::default()
        };
        let resolved = resolve(cfg, Path::new("/work"), &overrides).unwrap();
        assert_eq!(resolved.repo, "https://github.com/other/thing.git");
        assert_eq!(resolved.repo_dir, Path::new("/scratch/thing"));
        assert_eq!(resolved.issue_id, Some(99));
        assert!(resolved.should_comment());
        assert!(resolved.exit_fail);
        assert_eq!(resolved.timeout, Duration::from_secs(30));
    }

    #[test]
    fn load_without_file_reports_missing_fields() {
        let temp = TempDir::new().unwrap();
        let err = load(None, temp.path(), &Overrides::default()).unwrap_err();
        assert!(matches!(err, RelayError::ConfigValidationError { .. }));
    }
}
