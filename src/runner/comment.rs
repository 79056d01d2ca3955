//! Issue-comment composition and posting.
//!
//! The comment body is Markdown: a header naming the lint command and
//! repository, a count statement pointing at the CI run, and a collapsible
//! details block listing every finding. Lines that carry a browse-URL link
//! are rendered as `[relative-path](full-url) trailing-text`.

use crate::config::RunConfig;
use crate::error::Result;
use crate::runner::prepare::PreparedRepo;
use crate::runner::split_argv;
use crate::shell::{self, Deadline};
use std::fmt::Write;

/// Compose the Markdown comment body. `action_link` is the CI-run URL the
/// count statement points at; it is resolved by the caller so this stays a
/// pure function of its inputs.
pub fn build_issue_comment(
    cfg: &RunConfig,
    prepared: &PreparedRepo,
    lines: &[String],
    action_link: &str,
) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Run `{}` on Repo: {}", cfg.lint_display(), cfg.repo);
    s.push('\n');
    let _ = writeln!(
        s,
        "Got total {} line output in action: {}",
        lines.len(),
        action_link
    );
    s.push_str("<details>\n");
    s.push_str("<summary>Expand</summary>\n\n");
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(s, "{}. {}", i + 1, comment_line(&prepared.target, line));
    }
    s.push('\n');
    s.push_str("</details>\n\n");
    let _ = writeln!(s, "Report issue: {}/issues", cfg.repo);
    s
}

/// Render one finding. When the line contains the browse-URL prefix, the URL
/// token (up to the first space after it) becomes a Markdown link labelled
/// with the repo-relative path; anything else stays as trailing text.
fn comment_line(target: &str, line: &str) -> String {
    let (code_path, other) = match split_code_path(target, line) {
        Some(parts) => parts,
        None => return line.to_string(),
    };
    let path_text = code_path
        .replace(target, "")
        .trim_start_matches(['/', ':'])
        .to_string();
    format!("[{}]({}) {}", path_text, code_path, other)
}

/// Split a line into its browse-URL token and the surrounding text. Returns
/// None when the line has no browse-URL prefix.
fn split_code_path(target: &str, line: &str) -> Option<(String, String)> {
    let index = line.find(target)?;
    let mut other = line[..index].to_string();
    let tail = &line[index..];
    let code_path = match tail.find(' ') {
        Some(space) => {
            other.push_str(&tail[space..]);
            &tail[..space]
        }
        None => tail,
    };
    Some((code_path.trim().to_string(), other.trim().to_string()))
}

/// Post the comment via the external issue-comment command, appending the
/// issue id and `--body <body>` to the configured argv.
pub fn create_issue_comment(
    cfg: &RunConfig,
    prepared: &PreparedRepo,
    lines: &[String],
    action_link: &str,
    deadline: &Deadline,
) -> Result<()> {
    let Some(issue_id) = cfg.issue_id else {
        return Ok(());
    };
    let body = build_issue_comment(cfg, prepared, lines, action_link);

    let mut argv = cfg.comment_command.clone();
    argv.push(issue_id.to_string());
    argv.push("--body".to_string());
    argv.push(body);

    let (program, args) = split_argv(&argv)?;
    tracing::info!("comment on issue #{}", issue_id);
    shell::execute_checked(program, args, None, deadline)?;
    Ok(())
}
