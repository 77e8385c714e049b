//! Rendering of diagnostics as CI workflow-command annotations.
//!
//! Each entry becomes one line:
//! `::<error|warning> file=<path>,line=<N>,col=<M>::<message>`
//!
//! The file path is the archive joined with the member path and cleaned
//! lexically. Stripping the workspace-root prefix is opt-in: historically the
//! prefix was left in place, and consumers may depend on that.

use crate::models::{ArchiveReport, DiagnosticEntry};
use std::path::Path;

/// Workspace root of GitHub-hosted container actions.
pub const DEFAULT_ROOT_PREFIX: &str = "/github/workspace/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootMode {
    /// Leave paths as they appear in the log.
    Keep,
    /// Make paths below the root prefix relative to it.
    Strip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPrefix {
    pub prefix: String,
    pub mode: RootMode,
}

impl Default for RootPrefix {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ROOT_PREFIX.to_string(),
            mode: RootMode::Keep,
        }
    }
}

impl RootPrefix {
    pub fn normalize(&self, path: &str) -> String {
        if self.mode == RootMode::Keep || self.prefix.is_empty() {
            return path.to_string();
        }
        let p = Path::new(path);
        if !p.starts_with(&self.prefix) {
            return path.to_string();
        }
        match pathdiff::diff_paths(p, &self.prefix) {
            Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Some(rel) => rel.to_string_lossy().to_string(),
            None => path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub root: RootPrefix,
    /// Apply workflow-command escaping to message and file values.
    pub escape: bool,
}

/// Lexically clean a slash-separated path.
///
/// Repeated separators collapse, `.` segments vanish and `..` removes the
/// preceding segment (or is dropped at the root of an absolute path).
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|s| *s != "..") {
                    out.pop();
                } else if !rooted {
                    out.push("..");
                }
            }
            s => out.push(s),
        }
    }
    let body = out.join("/");
    if rooted {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Join path elements, skipping empty ones, and clean the result.
pub fn join_clean(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        return String::new();
    }
    clean_path(&joined)
}

/// Path of an entry as the CI system should see it.
pub fn repo_path(archive: &str, member: &str, root: &RootPrefix) -> String {
    root.normalize(&join_clean(&[archive, member]))
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Render one annotation line (without trailing newline).
pub fn format_annotation(archive: &str, entry: &DiagnosticEntry, opts: &EmitOptions) -> String {
    let file = repo_path(archive, &entry.sub_file, &opts.root);
    let (file, message) = if opts.escape {
        (escape_property(&file), escape_data(&entry.message))
    } else {
        (file, entry.message.clone())
    };
    format!(
        "::{} file={},line={},col={}::{}",
        entry.severity.annotation_keyword(),
        file,
        entry.line,
        entry.column,
        message
    )
}

/// Render all annotations, archive by archive, entries in log order.
pub fn annotations(reports: &[ArchiveReport], opts: &EmitOptions) -> Vec<String> {
    reports
        .iter()
        .flat_map(|r| {
            r.entries
                .iter()
                .map(move |e| format_annotation(&r.archive_path, e, opts))
        })
        .collect()
}
