//! Rewrites local clone paths in lint output into browsable remote links.

/// Source-file locator marker produced by Go tooling (`file.go:7:6`).
const ANCHOR_FROM: &str = ".go:";

/// Anchor-friendly replacement (`file.go#L7:6`).
const ANCHOR_TO: &str = ".go#L";

/// Rewrite every occurrence of the local clone path into the remote
/// browse-URL prefix, then turn `file.go:line:col` locators into
/// `file.go#Lline:col` anchors. The path rewrite runs first so anchors are
/// computed on the already-rewritten remote path. Length and order are
/// preserved, and the transform is idempotent on lines that no longer carry
/// the clone path or the locator marker.
pub fn rewrite_links(lines: Vec<String>, repo_dir: &str, target: &str) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            let line = if line.contains(repo_dir) {
                line.replace(repo_dir, target)
            } else {
                line
            };
            if line.contains(ANCHOR_FROM) {
                line.replace(ANCHOR_FROM, ANCHOR_TO)
            } else {
                line
            }
        })
        .collect()
}
