pub mod decoder;
pub mod events;
pub mod generic;
pub mod installer;
pub mod line;
pub mod mask;
pub mod multiline;
pub mod redactor;
pub mod timestamp;

use line::LogLine;
use serde::Serialize;

/// Detected kind of a decoded source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Windows Installer verbose log
    Installer,
    /// One JSON event record per line, from an external event-log front-end
    EventRecords,
    /// Anything else: plain text with or without timestamps
    Generic,
}

/// Detect the source kind by sampling the first lines
/// Returns `Generic` when nothing more specific is found
pub fn detect_source_kind(lines: &[LogLine]) -> SourceKind {
    let mut record_lines = 0;
    let mut total_checked = 0;

    for line in lines.iter().take(100) {
        let text = line.text.as_str();

        if installer::is_installer_line(text) {
            tracing::info!("Detected installer log marker on line {}", line.line_number);
            return SourceKind::Installer;
        }

        if events::looks_like_record(text) {
            record_lines += 1;
        }
        total_checked += 1;

        // Enough evidence either way
        if total_checked >= 20 {
            break;
        }
    }

    // Majority of sampled lines are JSON objects
    if total_checked > 0 && record_lines * 2 > total_checked {
        tracing::info!("Detected {record_lines}/{total_checked} event record lines");
        return SourceKind::EventRecords;
    }

    tracing::info!("Using generic log format");
    SourceKind::Generic
}
