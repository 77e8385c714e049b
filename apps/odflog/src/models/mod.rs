//! Shared data models for parsed diagnostics and their archive grouping.

pub mod store;

pub use store::GroupedStore;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Severity tokens accepted in a header line.
pub enum Severity {
    Error,
    Info,
}

impl Severity {
    /// Parse the literal header token. Anything else is not a severity.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Error" => Some(Severity::Error),
            "Info" => Some(Severity::Info),
            _ => None,
        }
    }

    /// Workflow-command keyword used when annotating.
    pub fn annotation_keyword(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Info => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single diagnostic reported against a member of an archive.
pub struct DiagnosticEntry {
    pub sub_file: String,
    pub line: u64,
    pub column: u64,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caret_pos: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// All diagnostics of one archive, in log order.
pub struct ArchiveReport {
    #[serde(rename = "ods_path")]
    pub archive_path: String,
    pub entries: Vec<DiagnosticEntry>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Counters collected while scanning a log.
///
/// None of these change what gets emitted; they exist so degraded input
/// (orphan lines, unparsable positions, odd paths) can be reported.
pub struct ParseStats {
    pub lines: usize,
    pub headers: usize,
    pub snippets: usize,
    pub carets: usize,
    pub orphan_lines: usize,
    pub defaulted_positions: usize,
    pub fallback_paths: usize,
}
