//! Human-readable report written to standard output.

use crate::config::RunConfig;
use crate::runner::prepare::PreparedRepo;
use std::io::{self, Write};

const DIVIDER_WIDTH: usize = 100;

/// Print the run report: a count summary, the full configuration for audit,
/// every output line verbatim, and the issue-tracker link, separated by
/// dividers.
pub fn print_report(
    out: &mut impl Write,
    cfg: &RunConfig,
    prepared: &PreparedRepo,
    lines: &[String],
) -> io::Result<()> {
    let divider = "=".repeat(DIVIDER_WIDTH);
    writeln!(
        out,
        "Run linter `{}` got {} line outputs",
        cfg.lint_display(),
        lines.len()
    )?;
    writeln!(out, "{divider}")?;
    writeln!(out, "runner config: {cfg:?}")?;
    writeln!(out, "prepared repo: {prepared:?}")?;
    writeln!(out, "{divider}")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{divider}")?;
    writeln!(out, "Report issue: {}/issues", cfg.repo)?;
    Ok(())
}
