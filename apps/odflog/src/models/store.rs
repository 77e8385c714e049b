//! Archive-keyed grouping of finalized diagnostics.

use super::{ArchiveReport, DiagnosticEntry};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
/// Diagnostics grouped by archive path.
///
/// Storage is unordered; `into_reports` sorts groups by archive path so output is
/// stable across runs. Entries inside a group always keep log order.
pub struct GroupedStore {
    groups: HashMap<String, Vec<DiagnosticEntry>>,
}

impl GroupedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized entry under its archive.
    pub fn push(&mut self, archive: String, entry: DiagnosticEntry) {
        self.groups.entry(archive).or_default().push(entry);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, archive: &str) -> Option<&[DiagnosticEntry]> {
        self.groups.get(archive).map(Vec::as_slice)
    }

    /// Consume the store into reports ordered by archive path.
    pub fn into_reports(self) -> Vec<ArchiveReport> {
        let mut reports: Vec<ArchiveReport> = self
            .groups
            .into_iter()
            .map(|(archive_path, entries)| ArchiveReport {
                archive_path,
                entries,
            })
            .collect();
        reports.sort_by(|a, b| a.archive_path.cmp(&b.archive_path));
        reports
    }
}
