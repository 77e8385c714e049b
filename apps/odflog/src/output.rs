//! Output rendering for scanned diagnostics.
//!
//! Supports `github` (default, workflow-command annotations), `human`
//! (colored listing with a summary) and `json` (the grouped reports).

use crate::emit::{annotations, repo_path, EmitOptions};
use crate::models::{ArchiveReport, ParseStats, Severity};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print diagnostics in the requested format.
pub fn print_reports(reports: &[ArchiveReport], output: &str, opts: &EmitOptions) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_json(reports)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", utils::error_prefix(), e),
        },
        "human" => {
            for line in render_human(reports, opts, utils::use_colors(output)) {
                println!("{}", line);
            }
        }
        _ => {
            for line in annotations(reports, opts) {
                println!("{}", line);
            }
        }
    }
}

/// Compose the JSON document (pure) for testing: an array of archive reports.
pub fn compose_json(reports: &[ArchiveReport]) -> JsonVal {
    json!(reports)
}

fn count(reports: &[ArchiveReport], sev: Severity) -> usize {
    reports
        .iter()
        .flat_map(|r| r.entries.iter())
        .filter(|e| e.severity == sev)
        .count()
}

/// Number of `Error` diagnostics across all reports.
pub fn error_count(reports: &[ArchiveReport]) -> usize {
    count(reports, Severity::Error)
}

/// Human-readable listing; one line per diagnostic plus snippet lines.
pub fn render_human(reports: &[ArchiveReport], opts: &EmitOptions, color: bool) -> Vec<String> {
    let mut out = Vec::new();
    for r in reports {
        for e in &r.entries {
            let (icon, sev) = match e.severity {
                Severity::Error if color => ("✖".red().to_string(), "⟦error⟧".red().bold().to_string()),
                Severity::Error => ("✖".to_string(), "⟦error⟧".to_string()),
                Severity::Info if color => {
                    ("▲".yellow().to_string(), "⟦warn⟧".yellow().bold().to_string())
                }
                Severity::Info => ("▲".to_string(), "⟦warn⟧".to_string()),
            };
            let loc = format!(
                "{}:{}:{}",
                repo_path(&r.archive_path, &e.sub_file, &opts.root),
                e.line,
                e.column
            );
            let loc = if color { loc.bold().to_string() } else { loc };
            out.push(format!("{} {} {} — {}", icon, sev, loc, e.message));
            if let Some(code) = &e.code_line {
                out.push(format!("    │ {}", code));
            }
            // Caret column is measured against the untrimmed log line
            if let Some(pos) = e.caret_pos {
                let caret = format!("{}^", " ".repeat(pos));
                let caret = if color { caret.red().to_string() } else { caret };
                out.push(format!("    │ {}", caret));
            }
        }
    }
    let summary = format!(
        "— Summary — errors={} warnings={} archives={}",
        count(reports, Severity::Error),
        count(reports, Severity::Info),
        reports.len()
    );
    out.push(if color {
        summary.bold().to_string()
    } else {
        summary
    });
    out
}

/// Print scan counters to stderr.
pub fn print_stats(stats: &ParseStats) {
    eprintln!(
        "{} lines={} headers={} snippets={} carets={} orphan_lines={} defaulted_positions={} fallback_paths={}",
        utils::info_prefix(),
        stats.lines,
        stats.headers,
        stats.snippets,
        stats.carets,
        stats.orphan_lines,
        stats.defaulted_positions,
        stats.fallback_paths
    );
}
