// RcaCrab - GPL-3.0-or-later
// This file is part of RcaCrab.
//
// Copyright (C) 2026 Daniel Freiermuth
//
// RcaCrab is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// RcaCrab is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with RcaCrab.  If not, see <https://www.gnu.org/licenses/>.

//! Pre-parsed event records.
//!
//! Binary event logs are decoded by an external front-end that emits one
//! JSON object per line with `event_id`, `timestamp` and `message`. Records
//! are taken as-is; a record that is not a JSON object is skipped.

use super::line::LogLine;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub event_id: String,
    pub timestamp: String,
    pub message: String,
}

fn field(object: &serde_json::Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl EventRecord {
    /// Pull the common fields out of a decoded record. Missing fields become
    /// empty strings; numeric ids are rendered as text.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            event_id: field(object, "event_id"),
            timestamp: field(object, "timestamp"),
            message: field(object, "message"),
        })
    }

    /// Render as a log line: `<timestamp> [<event_id>] <message>`.
    pub fn to_line_text(&self) -> String {
        let mut text = String::new();
        if !self.timestamp.is_empty() {
            text.push_str(&self.timestamp);
            text.push(' ');
        }
        if !self.event_id.is_empty() {
            text.push('[');
            text.push_str(&self.event_id);
            text.push_str("] ");
        }
        text.push_str(&self.message);
        text.trim().to_string()
    }
}

/// Whether a line looks like a JSON-encoded record.
pub fn looks_like_record(line: &str) -> bool {
    line.starts_with('{') && line.ends_with('}')
}

/// Parse one record per line, skipping malformed ones. Each record comes
/// back with the line it was read from.
pub fn parse_records(lines: &[LogLine]) -> Vec<(&LogLine, EventRecord)> {
    let mut records = Vec::with_capacity(lines.len());
    let mut skipped = 0usize;
    for line in lines {
        let record = serde_json::from_str::<Value>(&line.text)
            .ok()
            .as_ref()
            .and_then(EventRecord::from_value);
        match record {
            Some(record) => records.push((line, record)),
            None => {
                skipped += 1;
                tracing::debug!("Skipping malformed event record on line {}", line.line_number);
            }
        }
    }
    if skipped > 0 {
        tracing::info!("Skipped {skipped} malformed event records");
    }
    records
}

/// Parse records and render them as lines, keeping each record's source
/// line number.
pub fn records_to_lines(lines: &[LogLine]) -> Vec<LogLine> {
    parse_records(lines)
        .into_iter()
        .filter_map(|(line, record)| {
            let text = record.to_line_text();
            (!text.is_empty()).then(|| line.with_text(text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_extracted() {
        let lines = LogLine::from_texts([
            r#"{"event_id": 7000, "timestamp": "2025-07-27 14:22:05", "message": "Service failed to start"}"#,
        ]);
        let records: Vec<EventRecord> =
            parse_records(&lines).into_iter().map(|(_, record)| record).collect();
        assert_eq!(
            records,
            vec![EventRecord {
                event_id: "7000".to_string(),
                timestamp: "2025-07-27 14:22:05".to_string(),
                message: "Service failed to start".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let lines = LogLine::from_texts([r#"{"message": "only a message"}"#]);
        let records = parse_records(&lines);
        let (line, record) = &records[0];
        assert_eq!(line.line_number, 1);
        assert_eq!(record.event_id, "");
        assert_eq!(record.to_line_text(), "only a message");
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let lines = LogLine::from_texts([
            r#"{"event_id": "1", "message": "first"}"#,
            r#"{"event_id": "2", "message": "#,
            "[1, 2, 3]",
            r#"{"event_id": "3", "timestamp": null, "message": "third"}"#,
        ]);
        assert_eq!(parse_records(&lines).len(), 2);

        let rendered = records_to_lines(&lines);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].text, "[1] first");
        assert_eq!(rendered[1].text, "[3] third");
        assert_eq!(rendered[1].line_number, 4);
    }

    #[test]
    fn test_rendered_line_carries_timestamp() {
        let record = EventRecord {
            event_id: "4625".to_string(),
            timestamp: "2025-07-27T14:22:05".to_string(),
            message: "An account failed to log on".to_string(),
        };
        assert_eq!(
            record.to_line_text(),
            "2025-07-27T14:22:05 [4625] An account failed to log on"
        );
    }
}
