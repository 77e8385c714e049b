//! Record accumulation over classified log lines.
//!
//! The scan is a fold: `Accumulator::step` takes the state by value together
//! with one `LineKind` and returns the next state. At most one record is open
//! at a time; it is finalized into the `GroupedStore` when the next header
//! arrives or when `finish` is called at end of input.

use crate::classify::{classify_line, parse_position, split_archive_path, LineKind, SplitKind};
use crate::error::LoadError;
use crate::models::{DiagnosticEntry, GroupedStore, ParseStats};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Outcome of scanning a whole log.
#[derive(Debug, Default)]
pub struct Scan {
    pub store: GroupedStore,
    pub stats: ParseStats,
}

#[derive(Debug)]
struct OpenRecord {
    archive: String,
    entry: DiagnosticEntry,
}

#[derive(Debug)]
pub struct Accumulator {
    extension: String,
    current: Option<OpenRecord>,
    store: GroupedStore,
    stats: ParseStats,
}

impl Accumulator {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            current: None,
            store: GroupedStore::new(),
            stats: ParseStats::default(),
        }
    }

    /// Advance the state by one classified line.
    pub fn step(mut self, kind: LineKind) -> Self {
        self.stats.lines += 1;
        match kind {
            LineKind::Header(h) => {
                self.finalize();
                self.stats.headers += 1;
                let split = split_archive_path(&h.path, &self.extension);
                if split.kind == SplitKind::Fallback {
                    self.stats.fallback_paths += 1;
                    debug!("path without {} archive: {}", self.extension, h.path);
                }
                let (mut line, mut column) = (0, 0);
                if let Some((l, c)) = h.position.as_ref() {
                    let (pl, pc) = (parse_position(l), parse_position(c));
                    if !(pl.parsed && pc.parsed) {
                        self.stats.defaulted_positions += 1;
                        debug!("position [{},{}] defaulted for {}", l, c, h.path);
                    }
                    line = pl.value;
                    column = pc.value;
                }
                self.current = Some(OpenRecord {
                    archive: split.archive,
                    entry: DiagnosticEntry {
                        sub_file: split.member,
                        line,
                        column,
                        severity: h.severity,
                        message: h.message,
                        code_line: None,
                        caret_pos: None,
                    },
                });
            }
            LineKind::Caret(pos) => match self.current.as_mut() {
                Some(rec) => {
                    self.stats.carets += 1;
                    rec.entry.caret_pos = Some(pos);
                }
                None => self.orphan("caret marker"),
            },
            LineKind::Text(text) => match self.current.as_mut() {
                Some(rec) => {
                    self.stats.snippets += 1;
                    rec.entry.code_line = Some(text);
                }
                None => self.orphan(&text),
            },
            LineKind::Blank => {}
        }
        self
    }

    /// Close the open record, if any, and hand back the grouped result.
    pub fn finish(mut self) -> Scan {
        self.finalize();
        Scan {
            store: self.store,
            stats: self.stats,
        }
    }

    fn finalize(&mut self) {
        if let Some(rec) = self.current.take() {
            self.store.push(rec.archive, rec.entry);
        }
    }

    fn orphan(&mut self, what: &str) {
        self.stats.orphan_lines += 1;
        debug!("discarding line outside any diagnostic: {}", what);
    }
}

/// Fold an iterator of lines into grouped diagnostics.
pub fn scan_lines<I, S>(lines: I, extension: &str) -> Scan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|l| classify_line(l.as_ref()))
        .fold(Accumulator::new(extension), Accumulator::step)
        .finish()
}

/// Scan a stream line by line. `\r\n` endings are accepted and invalid
/// UTF-8 is replaced rather than rejected.
pub fn scan_reader<R: BufRead>(reader: R, extension: &str) -> std::io::Result<Scan> {
    let acc = reader
        .split(b'\n')
        .try_fold(Accumulator::new(extension), |acc, chunk| {
            let mut bytes = chunk?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let line = String::from_utf8_lossy(&bytes);
            Ok::<_, std::io::Error>(acc.step(classify_line(&line)))
        })?;
    Ok(acc.finish())
}

/// Open and scan the log at `path`.
pub fn load_log(path: &Path, extension: &str) -> Result<Scan, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    scan_reader(BufReader::new(file), extension).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
