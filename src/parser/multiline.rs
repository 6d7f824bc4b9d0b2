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

//! Multi-line event reassembly.
//!
//! A line that starts with a timestamp (optionally inside `[`) opens a new
//! event; anything else continues the open one. Stack traces and wrapped
//! messages thereby end up in the entry of the line that introduced them.

use super::line::{LogEntry, LogLine};
use fancy_regex::Regex;
use std::sync::LazyLock;

static EVENT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[?\d{4}[-/]\d{2}[-/]\d{2}[ T]\d{2}:\d{2}").expect("valid regex literal")
});

/// Whether `line` begins a new event.
pub fn starts_event(line: &str) -> bool {
    EVENT_START.is_match(line).unwrap_or(false)
}

/// Line accumulator holding the entry still being built.
#[derive(Debug, Default)]
pub struct EntryAccumulator {
    open: Option<LogEntry>,
}

impl EntryAccumulator {
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Feed one line. Returns the previous entry when `line` starts a new one.
    pub fn push(&mut self, line: &LogLine) -> Option<LogEntry> {
        if starts_event(&line.text) {
            return self.open.replace(LogEntry::new(line));
        }
        match &mut self.open {
            Some(entry) => entry.append(line),
            // Leading continuation lines still form an entry
            None => self.open = Some(LogEntry::new(line)),
        }
        None
    }

    /// Flush whatever is still open.
    pub fn finish(self) -> Option<LogEntry> {
        self.open
    }
}

/// Merge lines into entries. Every input line lands in exactly one entry.
pub fn merge(lines: &[LogLine]) -> Vec<LogEntry> {
    profiling::scope!("merge");
    let mut accumulator = EntryAccumulator::new();
    let mut entries = Vec::new();
    for line in lines {
        if let Some(done) = accumulator.push(line) {
            entries.push(done);
        }
    }
    entries.extend(accumulator.finish());
    tracing::debug!("Merged {} lines into {} entries", lines.len(), entries.len());
    entries
}
