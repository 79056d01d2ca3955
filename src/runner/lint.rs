//! Lint execution and output filtering.

use crate::config::RunConfig;
use crate::error::{RelayError, Result};
use crate::runner::split_argv;
use crate::shell::{self, Deadline};

/// Argument appended to the lint command so it scans the whole module tree.
const SCAN_ALL: &str = "./...";

/// Run the lint command in the clone and return the filtered output lines.
///
/// Lint tools routinely exit non-zero when they have findings, so a failing
/// process that produced stdout is still a successful run; only a failure
/// with nothing on stdout is an error. Empty output after trimming means
/// "no findings" and yields an empty list.
pub fn run(cfg: &RunConfig, deadline: &Deadline) -> Result<Vec<String>> {
    let mut argv = cfg.lint.clone();
    argv.push(SCAN_ALL.to_string());
    let (program, args) = split_argv(&argv)?;

    let result = shell::execute(program, args, Some(&cfg.repo_dir), deadline)?;
    if !result.success {
        tracing::debug!(
            "lint command exited with {:?}, {} stdout bytes",
            result.exit_code,
            result.stdout.len()
        );
        println!("stdout:\n{}", result.stdout);
        println!("stderr:\n{}", result.stderr);
        if result.stdout.is_empty() {
            return Err(RelayError::CommandFailed {
                program: program.to_string(),
                args: args.to_vec(),
                code: result.exit_code,
            });
        }
    }

    let mut text = result.stdout;
    if cfg.collect_stderr {
        text.push('\n');
        text.push_str(&result.stderr);
    }

    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    Ok(filter_lines(text.lines(), &cfg.includes, &cfg.excludes))
}

/// Keep a line iff it matches the include filters and none of the exclude
/// filters. Matching is case-sensitive substring containment; order is
/// preserved and blank lines are dropped.
pub fn filter_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    includes: &[String],
    excludes: &[String],
) -> Vec<String> {
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| include_line(includes, line) && !exclude_line(excludes, line))
        .map(str::to_string)
        .collect()
}

fn include_line(includes: &[String], line: &str) -> bool {
    includes.is_empty() || includes.iter().any(|v| line.contains(v.as_str()))
}

fn exclude_line(excludes: &[String], line: &str) -> bool {
    excludes.iter().any(|v| line.contains(v.as_str()))
}
