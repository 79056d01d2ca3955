//! Configuration schema definitions for lintrelay.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format, plus the resolved [`RunConfig`] the pipeline
//! actually consumes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// An external command in configuration: either a single string that is
/// split on whitespace, or an explicit argument list. The list form is
/// canonical; the string form exists for convenience and cannot express
/// arguments containing spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Line(String),
    Argv(Vec<String>),
}

impl CommandSpec {
    /// Resolve to an argument vector (program first).
    pub fn to_argv(&self) -> Vec<String> {
        match self {
            CommandSpec::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            CommandSpec::Argv(argv) => argv.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_argv().is_empty()
    }
}

impl Default for CommandSpec {
    fn default() -> Self {
        CommandSpec::Argv(Vec::new())
    }
}

/// Root configuration structure for lintrelay.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Repository URL to clone and lint
    pub repo: String,

    /// Working directory the clone lands in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdir: Option<PathBuf>,

    /// Command that installs the linter
    pub install_command: CommandSpec,

    /// The lint command itself (the scan-everything argument is appended)
    pub linter_command: CommandSpec,

    /// Run a build before linting
    #[serde(default, skip_serializing_if = "is_false")]
    pub build: bool,

    /// Append stderr to the lint output before filtering
    #[serde(default, skip_serializing_if = "is_false")]
    pub collect_stderr: bool,

    /// Keep only lines containing at least one of these substrings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    /// Drop lines containing any of these substrings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,

    /// Exit non-zero when findings remain after filtering
    #[serde(default, skip_serializing_if = "is_false")]
    pub exit_fail: bool,

    /// Overall pipeline budget in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Marker file that gates linting (absent file means skip)
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Issue-tracker comment settings
    #[serde(default)]
    pub issue: IssueConfig,

    /// Overrides for the external binaries the pipeline invokes
    #[serde(default)]
    pub commands: CommandOverrides,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            workdir: None,
            install_command: CommandSpec::default(),
            linter_command: CommandSpec::default(),
            build: false,
            collect_stderr: false,
            includes: Vec::new(),
            excludes: Vec::new(),
            exit_fail: false,
            timeout_seconds: None,
            manifest: default_manifest(),
            issue: IssueConfig::default(),
            commands: CommandOverrides::default(),
        }
    }
}

/// Issue-comment settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueConfig {
    /// Issue number to comment on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Post the report as an issue comment
    #[serde(default, skip_serializing_if = "is_false")]
    pub comment: bool,
}

/// Overrides for the fixed external collaborators. Defaults target Go
/// repositories on GitHub; tests swap in fakes here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOverrides {
    /// Clone command; the repository URL is appended
    pub clone: CommandSpec,

    /// Prints the checked-out branch on stdout
    pub branch: CommandSpec,

    /// Downloads build dependencies inside the clone
    pub deps: CommandSpec,

    /// Compiles the clone when `build` is set
    pub build: CommandSpec,

    /// Posts the issue comment; issue id and `--body <body>` are appended
    pub comment: CommandSpec,
}

impl Default for CommandOverrides {
    fn default() -> Self {
        Self {
            clone: CommandSpec::Line("git clone".into()),
            branch: CommandSpec::Line("git branch --show-current".into()),
            deps: CommandSpec::Line("go mod download".into()),
            build: CommandSpec::Line("go build ./...".into()),
            comment: CommandSpec::Line("gh issue comment".into()),
        }
    }
}

fn default_manifest() -> String {
    "go.mod".to_string()
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}

fn is_false(v: &bool) -> bool {
    !v
}

/// Fully resolved run configuration: file values overlaid with CLI flags,
/// paths made concrete. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Repository URL.
    pub repo: String,

    /// Directory the clone is created in.
    pub workdir: PathBuf,

    /// The clone itself: `<workdir>/<repo basename>`.
    pub repo_dir: PathBuf,

    /// Linter install argv, run in the workdir.
    pub install: Vec<String>,

    /// Lint argv, run in the clone.
    pub lint: Vec<String>,

    /// Clone argv (repo URL appended).
    pub clone: Vec<String>,

    /// Branch-query argv, stdout captured.
    pub branch: Vec<String>,

    /// Dependency-download argv.
    pub deps: Vec<String>,

    /// Build argv, used when `build` is set.
    pub build_command: Vec<String>,

    /// Issue-comment argv (issue id and body appended).
    pub comment_command: Vec<String>,

    /// Include filters (empty keeps everything).
    pub includes: Vec<String>,

    /// Exclude filters.
    pub excludes: Vec<String>,

    /// Run the build stage before linting.
    pub build: bool,

    /// Append stderr to the lint output.
    pub collect_stderr: bool,

    /// Exit non-zero on findings.
    pub exit_fail: bool,

    /// Issue to comment on.
    pub issue_id: Option<u64>,

    /// Post the report as an issue comment.
    pub comment: bool,

    /// Overall pipeline budget.
    #[serde(serialize_with = "serialize_secs")]
    pub timeout: Duration,

    /// Build-manifest file name checked inside the clone.
    pub manifest: String,
}

impl RunConfig {
    /// The lint command rendered for display, e.g. in the report header.
    pub fn lint_display(&self) -> String {
        self.lint.join(" ")
    }

    /// Whether an issue comment should be posted for this run.
    pub fn should_comment(&self) -> bool {
        self.comment && self.issue_id.is_some()
    }
}

/// Directory name a clone of `repo` lands in: the last URL segment with any
/// `.git` suffix removed.
pub fn repo_dir_name(repo: &str) -> String {
    let trimmed = repo.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.trim_end_matches(".git").to_string()
}

/// Canonical config for unit tests across the crate.
#[cfg(test)]
pub(crate) fn sample_run_config() -> RunConfig {
    RunConfig {
        repo: "https://github.com/org/repo".into(),
        workdir: PathBuf::from("/tmp/work"),
        repo_dir: PathBuf::from("/tmp/work/repo"),
        install: vec!["true".into()],
        lint: vec!["mylint".into()],
        clone: vec!["git".into(), "clone".into()],
        branch: vec!["git".into(), "branch".into(), "--show-current".into()],
        deps: vec!["go".into(), "mod".into(), "download".into()],
        build_command: vec!["go".into(), "build".into(), "./...".into()],
        comment_command: vec!["gh".into(), "issue".into(), "comment".into()],
        includes: Vec::new(),
        excludes: Vec::new(),
        build: false,
        collect_stderr: false,
        exit_fail: false,
        issue_id: None,
        comment: false,
        timeout: Duration::from_secs(600),
        manifest: "go.mod".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_splits_string_form() {
        let spec = CommandSpec::Line("go install example.com/lint@latest".into());
        assert_eq!(
            spec.to_argv(),
            vec!["go", "install", "example.com/lint@latest"]
        );
    }

    #[test]
    fn command_spec_keeps_argv_form() {
        let spec = CommandSpec::Argv(vec!["sh".into(), "-c".into(), "echo a b".into()]);
        assert_eq!(spec.to_argv(), vec!["sh", "-c", "echo a b"]);
    }

    #[test]
    fn command_spec_deserializes_both_forms() {
        let line: CommandSpec = serde_yaml::from_str("go vet").unwrap();
        assert_eq!(line.to_argv(), vec!["go", "vet"]);

        let argv: CommandSpec = serde_yaml::from_str("[go, vet]").unwrap();
        assert_eq!(argv.to_argv(), vec!["go", "vet"]);
    }

    #[test]
    fn relay_config_parses_minimal_yaml() {
        let cfg: RelayConfig = serde_yaml::from_str(
            r#"
repo: https://github.com/org/repo
install_command: go install example.com/lint@latest
linter_command: mylint
"#,
        )
        .unwrap();
        assert_eq!(cfg.repo, "https://github.com/org/repo");
        assert_eq!(cfg.manifest, "go.mod");
        assert!(!cfg.exit_fail);
        assert_eq!(cfg.commands.clone.to_argv(), vec!["git", "clone"]);
    }

    #[test]
    fn relay_config_parses_filters_and_issue() {
        let cfg: RelayConfig = serde_yaml::from_str(
            r#"
repo: https://github.com/org/repo
linter_command: [mylint, -strict]
includes: ["warning:"]
excludes: [vendor/, _test.go]
issue:
  id: 42
  comment: true
"#,
        )
        .unwrap();
        assert_eq!(cfg.includes, vec!["warning:"]);
        assert_eq!(cfg.excludes, vec!["vendor/", "_test.go"]);
        assert_eq!(cfg.issue.id, Some(42));
        assert!(cfg.issue.comment);
    }

    #[test]
    fn repo_dir_name_strips_git_suffix() {
        assert_eq!(
            repo_dir_name("https://github.com/org/repo.git"),
            "repo"
        );
        assert_eq!(repo_dir_name("https://github.com/org/repo"), "repo");
        assert_eq!(repo_dir_name("https://github.com/org/repo/"), "repo");
    }

    #[test]
    fn should_comment_requires_flag_and_id() {
        let mut cfg = sample_run_config();
        assert!(!cfg.should_comment());
        cfg.comment = true;
        assert!(!cfg.should_comment());
        cfg.issue_id = Some(7);
        assert!(cfg.should_comment());
    }
}
