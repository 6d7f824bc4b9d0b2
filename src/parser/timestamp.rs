//! Timestamp recognition and canonical rendering.
//!
//! Canonical form is `YYYY-MM-DDTHH:MM:SS`. Both the normalizer and the
//! spike detector use the pattern and source formats defined here.

use super::line::{LogEntry, LogLine};
use chrono::NaiveDateTime;
use fancy_regex::Regex;
use std::sync::LazyLock;

/// Date with `-` or `/`, then `T` or a space, then a clock with seconds.
static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}[-/]\d{2}[-/]\d{2}[ T]\d{2}:\d{2}:\d{2}").expect("valid regex literal")
});

/// Source formats, tried in order until one parses.
pub const SOURCE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%dT%H:%M:%S",
];

pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Find the first timestamp-shaped substring in `line`.
pub fn find_timestamp(line: &str) -> Option<&str> {
    TIMESTAMP_PATTERN
        .find(line)
        .ok()
        .flatten()
        .map(|m| m.as_str())
}

/// Parse a raw timestamp with the first source format that accepts it.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    SOURCE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Extract and parse the first timestamp in `line`.
pub fn extract_timestamp(line: &str) -> Option<NaiveDateTime> {
    find_timestamp(line).and_then(parse_timestamp)
}

/// Rewrite the first recognized timestamp into canonical form.
///
/// Every occurrence of that exact substring is replaced. Lines without a
/// timestamp, or whose timestamp matches the shape but not a real date
/// (2025-02-30), come back unchanged.
pub fn normalize(line: &str) -> String {
    let Some(raw) = find_timestamp(line) else {
        return line.to_string();
    };
    match parse_timestamp(raw) {
        Some(ts) => line.replace(raw, &ts.format(CANONICAL_FORMAT).to_string()),
        None => line.to_string(),
    }
}

pub fn normalize_lines(lines: &[LogLine]) -> Vec<LogLine> {
    profiling::scope!("normalize_lines");
    lines
        .iter()
        .map(|line| line.with_text(normalize(&line.text)))
        .collect()
}

/// Normalize each entry's text. Only the first timestamp of the whole entry
/// is rewritten, which is the head line's for reassembled entries.
pub fn normalize_entries(entries: &[LogEntry]) -> Vec<LogEntry> {
    entries
        .iter()
        .map(|entry| LogEntry {
            text: normalize(&entry.text),
            ..entry.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_and_slash_formats() {
        assert_eq!(
            normalize("2025-07-28 13:45:02 started"),
            "2025-07-28T13:45:02 started"
        );
        assert_eq!(
            normalize("[2025/07/28 13:45:02] started"),
            "[2025-07-28T13:45:02] started"
        );
    }

    #[test]
    fn test_already_canonical() {
        let line = "2025-07-28T13:45:02 ok";
        assert_eq!(normalize(line), line);
    }

    #[test]
    fn test_passthrough_without_timestamp() {
        assert_eq!(normalize("no time here"), "no time here");
        assert_eq!(normalize("13:45:02 clock only"), "13:45:02 clock only");
    }

    #[test]
    fn test_passthrough_on_impossible_date() {
        let line = "2025-02-30 10:00:00 leap confusion";
        assert_eq!(normalize(line), line);
    }

    #[test]
    fn test_passthrough_on_mixed_separators() {
        let line = "2025-07/28 10:00:00 odd";
        assert_eq!(normalize(line), line);
    }

    #[test]
    fn test_extract_tolerates_t_and_space() {
        let a = extract_timestamp("x 2025-01-01T00:00:59 y").expect("should parse");
        let b = extract_timestamp("x 2025-01-01 00:00:59 y").expect("should parse");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_entries_keeps_positions() {
        let mut entry = LogEntry::new(&LogLine::new("2025/01/02 03:04:05 boom", 7));
        entry.append(&LogLine::new("at Foo.Bar()", 8));
        let out = normalize_entries(&[entry]);
        assert_eq!(out[0].text, "2025-01-02T03:04:05 boom\nat Foo.Bar()");
        assert_eq!(out[0].start_line, 7);
        assert_eq!(out[0].line_count, 2);
    }
}
