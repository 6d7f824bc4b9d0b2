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

//! Sensitive data redaction.
//!
//! Categories run in a fixed order and each one sees the output of the ones
//! before it. Every match becomes `[REDACTED_<LABEL>]`.

use super::line::LogLine;
use super::mask::{MaskRule, Masker};

/// Upper bound on re-application passes. The stock categories settle after
/// at most two; custom ones are cut off here.
const MAX_PASSES: usize = 8;

/// Stock categories, in application order.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("IP", r"\b(?:\d{1,3}\.){3}\d{1,3}\b"),
    ("EMAIL", r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+"),
    ("USERNAME", r"(?i)user=[^\s]+"),
    // SSN, (555) 123-4567, bare 10-digit numbers
    (
        "PII",
        r"\b\d{3}-\d{2}-\d{4}\b|\(\d{3}\)\s*\d{3}-\d{4}\b|\b\d{10}\b",
    ),
    ("SERIAL", r"\b[A-Z0-9]{4,}-[A-Z0-9]{4,}(?:-[A-Z0-9]{4,})?\b"),
    // Unix path fragments and drive-letter paths. The lookbehind keeps
    // dates like 2025/07/28 intact.
    ("FOLDER", r"(?<![\w/])(?:/[\w.-]+)+|\b[A-Za-z]:\\[^\s]*"),
    // v1.2.3, version: 1.2.0-beta. Never starts inside a clock or a number.
    (
        "VERSION",
        r"(?<![\w:.])(?:[vV](?:ersion)?\s*[:=]?\s*)?\d+\.\d+(?:\.\d+)?(?:-[a-zA-Z0-9]+)?\b",
    ),
    ("TOOL", r"\b(?:internal|tool)_[a-zA-Z0-9_]+\b"),
];

/// Placeholder written in place of a `label` match.
pub fn placeholder(label: &str) -> String {
    format!("[REDACTED_{label}]")
}

/// Line-by-line redaction over an ordered category list.
#[derive(Debug, Clone)]
pub struct Redactor {
    masker: Masker,
}

impl Redactor {
    /// Build a redactor from `(label, pattern)` pairs, applied in the given
    /// order.
    pub fn new(categories: Vec<MaskRule>) -> Self {
        Self {
            masker: Masker::new(categories),
        }
    }

    /// Redact one line.
    ///
    /// A replacement can expose a new match for an earlier category, so the
    /// category list is re-applied until the line stops changing. That makes
    /// the result a fixed point: redacting it again returns it unchanged.
    #[must_use]
    pub fn redact_line(&self, line: &str) -> String {
        let mut current = self.masker.apply(line);
        for _ in 1..MAX_PASSES {
            let next = self.masker.apply(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Redact every line. Same length, same order, same line numbers.
    #[must_use]
    pub fn redact(&self, lines: &[LogLine]) -> Vec<LogLine> {
        profiling::scope!("redact");
        lines
            .iter()
            .map(|line| line.with_text(self.redact_line(&line.text)))
            .collect()
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(label, pattern)| MaskRule::from_literal(label, pattern, &placeholder(label)))
                .collect(),
        )
    }
}
