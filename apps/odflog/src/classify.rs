//! Line classification for validator logs.
//!
//! Every input line is one of:
//! - a header announcing a diagnostic: `<path>[<line>,<col>]: <Severity>: <message>`
//!   (position group optional, severity limited to `Error` or `Info`);
//! - a caret marker (`----^`) pointing at a column of the previous snippet;
//! - any other non-blank text, which is a snippet when a record is open;
//! - a blank line.
//!
//! Parsing is best-effort. Numeric fields and archive paths never fail; the
//! returned values carry a flag telling whether a default was substituted.

use crate::models::Severity;
use regex::Regex;
use std::sync::OnceLock;

/// Marker sequence identifying a caret line.
pub const CARET_MARKER: &str = "----^";

/// Default archive extension used to split member paths.
pub const DEFAULT_EXTENSION: &str = ".ods";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fields extracted from a header line.
pub struct Header {
    pub path: String,
    pub position: Option<(String, String)>,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Category of a single log line.
pub enum LineKind {
    Header(Header),
    /// Character index of the caret within the line.
    Caret(usize),
    /// Trimmed text of a non-blank, non-header, non-caret line.
    Text(String),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a best-effort parse: the value, and whether it was parsed or defaulted.
pub struct Parsed<T> {
    pub value: T,
    pub parsed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which rule produced an archive/member split.
pub enum SplitKind {
    /// `<ext>/` found; member path follows it.
    Member,
    /// Path ends with the extension; no member.
    Archive,
    /// Neither matched; whole path taken as archive.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSplit {
    pub archive: String,
    pub member: String,
    pub kind: SplitKind,
}

// Digits and whitespace are ASCII-only; other scripts stay part of the path or message.
fn header_regex() -> &'static Regex {
    static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADER_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?P<path>.+?)(?:\[(?P<line>[0-9]+),(?P<col>[0-9]+)\])?:[\t\n\x0C\r ]+(?P<severity>Error|Info):[\t\n\x0C\r ]+(?P<msg>.+)$",
        )
        .expect("header pattern is a valid regex")
    })
}

/// Try to read `line` as a diagnostic header.
pub fn parse_header(line: &str) -> Option<Header> {
    let caps = header_regex().captures(line)?;
    let severity = Severity::from_token(caps.name("severity")?.as_str())?;
    let position = match (caps.name("line"), caps.name("col")) {
        (Some(l), Some(c)) => Some((l.as_str().to_string(), c.as_str().to_string())),
        _ => None,
    };
    Some(Header {
        path: caps.name("path")?.as_str().trim().to_string(),
        position,
        severity,
        message: caps.name("msg")?.as_str().trim().to_string(),
    })
}

/// Character index of the first `^` when `line` carries the caret marker.
pub fn caret_position(line: &str) -> Option<usize> {
    if !line.contains(CARET_MARKER) {
        return None;
    }
    let byte = line.find('^')?;
    Some(line[..byte].chars().count())
}

/// Classify one line. Headers win over caret markers, caret markers over text.
pub fn classify_line(line: &str) -> LineKind {
    if let Some(h) = parse_header(line) {
        return LineKind::Header(h);
    }
    if let Some(pos) = caret_position(line) {
        return LineKind::Caret(pos);
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(trimmed.to_string())
    }
}

/// Parse a decimal position field, yielding zero when it does not fit.
pub fn parse_position(text: &str) -> Parsed<u64> {
    match text.trim().parse::<u64>() {
        Ok(value) => Parsed {
            value,
            parsed: true,
        },
        Err(_) => Parsed {
            value: 0,
            parsed: false,
        },
    }
}

/// Split a path that may point inside an archive into `(archive, member)`.
///
/// `/data/x.ods/content.xml` gives `/data/x.ods` and `content.xml`. A bare
/// archive path yields an empty member, and so does anything unrecognised.
pub fn split_archive_path(full: &str, ext: &str) -> ArchiveSplit {
    let marker = format!("{}/", ext);
    if let Some((head, member)) = full.split_once(marker.as_str()) {
        return ArchiveSplit {
            archive: format!("{}{}", head, ext),
            member: member.to_string(),
            kind: SplitKind::Member,
        };
    }
    let kind = if full.ends_with(ext) {
        SplitKind::Archive
    } else {
        SplitKind::Fallback
    };
    ArchiveSplit {
        archive: full.to_string(),
        member: String::new(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_with_position() {
        let line = "/usr/src/./data/a.ods/content.xml[12,34]:  Error: element \"table:table\" is not allowed ";
        let h = parse_header(line).unwrap();
        assert_eq!(h.path, "/usr/src/./data/a.ods/content.xml");
        assert_eq!(h.position, Some(("12".to_string(), "34".to_string())));
        assert_eq!(h.severity, Severity::Error);
        assert_eq!(h.message, "element \"table:table\" is not allowed");
    }

    #[test]
    fn test_header_without_position() {
        let h = parse_header("/data/a.ods: Info: 3 errors, 1 warning").unwrap();
        assert_eq!(h.path, "/data/a.ods");
        assert_eq!(h.position, None);
        assert_eq!(h.severity, Severity::Info);
        assert_eq!(h.message, "3 errors, 1 warning");
    }

    #[test]
    fn test_unknown_severity_is_not_a_header() {
        assert!(parse_header("/data/a.ods/content.xml[1,2]: Warning: nope").is_none());
        assert!(parse_header("/data/a.ods/content.xml[1,2]: error: nope").is_none());
        assert_eq!(
            classify_line("/data/a.ods/content.xml[1,2]: Fatal: nope"),
            LineKind::Text("/data/a.ods/content.xml[1,2]: Fatal: nope".to_string())
        );
    }

    #[test]
    fn test_header_requires_message_and_space() {
        assert!(parse_header("/data/a.ods:Error: x").is_none());
        assert!(parse_header("/data/a.ods: Error:").is_none());
    }

    #[test]
    fn test_position_digits_and_separators_are_ascii_only() {
        // Arabic-Indic digits are not a position; the bracket stays in the path
        let h = parse_header("x.ods/c.xml[\u{0663},\u{0664}]: Error: m").unwrap();
        assert_eq!(h.path, "x.ods/c.xml[\u{0663},\u{0664}]");
        assert_eq!(h.position, None);

        // A no-break space is not a separator
        assert_eq!(
            classify_line("x.ods:\u{a0}Error: m"),
            LineKind::Text("x.ods:\u{a0}Error: m".to_string())
        );
        assert!(parse_header("x.ods: Error:\u{a0}m").is_none());
    }

    #[test]
    fn test_caret_line_index() {
        assert_eq!(caret_position("----------^"), Some(10));
        assert_eq!(classify_line("      ----^"), LineKind::Caret(10));
        // A lone caret without the dash run is plain text
        assert_eq!(caret_position("   ^"), None);
        // Index is counted in characters, not bytes
        assert_eq!(caret_position("ä----^"), Some(5));
    }

    #[test]
    fn test_blank_and_text_lines() {
        assert_eq!(classify_line("   \t "), LineKind::Blank);
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(
            classify_line("   <table:table-row/>  "),
            LineKind::Text("<table:table-row/>".to_string())
        );
    }

    #[test]
    fn test_parse_position_flags_defaults() {
        assert_eq!(parse_position("42"), Parsed { value: 42, parsed: true });
        assert_eq!(parse_position("0"), Parsed { value: 0, parsed: true });
        assert_eq!(
            parse_position("5000000000"),
            Parsed { value: 5_000_000_000, parsed: true }
        );
        assert_eq!(
            parse_position("99999999999999999999"),
            Parsed { value: 0, parsed: false }
        );
        assert_eq!(parse_position("x"), Parsed { value: 0, parsed: false });
    }

    #[test]
    fn test_split_member_path() {
        let s = split_archive_path(
            "/usr/src/./data/common-data-types-de_DE.UTF-8.ods/content.xml",
            DEFAULT_EXTENSION,
        );
        assert_eq!(s.archive, "/usr/src/./data/common-data-types-de_DE.UTF-8.ods");
        assert_eq!(s.member, "content.xml");
        assert_eq!(s.kind, SplitKind::Member);
    }

    #[test]
    fn test_split_bare_archive_and_fallback() {
        let s = split_archive_path("/data/a.ods", DEFAULT_EXTENSION);
        assert_eq!((s.archive.as_str(), s.member.as_str()), ("/data/a.ods", ""));
        assert_eq!(s.kind, SplitKind::Archive);

        let s = split_archive_path("/data/notes.txt", DEFAULT_EXTENSION);
        assert_eq!((s.archive.as_str(), s.member.as_str()), ("/data/notes.txt", ""));
        assert_eq!(s.kind, SplitKind::Fallback);
    }

    #[test]
    fn test_split_uses_first_marker_and_custom_extension() {
        let s = split_archive_path("/a.ods/b.ods/c.xml", DEFAULT_EXTENSION);
        assert_eq!(s.archive, "/a.ods");
        assert_eq!(s.member, "b.ods/c.xml");

        let s = split_archive_path("/docs/x.odt/styles.xml", ".odt");
        assert_eq!(s.archive, "/docs/x.odt");
        assert_eq!(s.member, "styles.xml");
    }
}
