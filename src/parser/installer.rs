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

//! Windows Installer (MSI verbose) log extraction.

use super::line::LogLine;
use fancy_regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// 9:41:07, 09:41:07 PM
static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}:\d{2}:\d{2}(?:\s*(?:AM|PM))?").expect("valid regex literal")
});

// Error 1603
static ERROR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Error\s*(\d+)").expect("valid regex literal"));

// Action start 14:22:01: InstallFinalize.
static ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Action\s+start\s+\d+:\d+:\d+:?\s+([^\r\n]+)").expect("valid regex literal")
});

const RETURN_VALUE_3: &str = "Return value 3";

/// Markers that identify an MSI verbose log in its first lines.
pub const INSTALLER_MARKERS: &[&str] = &[
    "=== Verbose logging started",
    "MSI (s)",
    "MSI (c)",
    "Windows Installer",
];

/// An error-bearing installer line and what could be pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerError {
    pub line: usize,
    pub raw: String,
    pub timestamp: Option<String>,
    pub error_code: Option<String>,
    pub action: Option<String>,
    pub return_value_3: bool,
}

pub fn is_installer_line(line: &str) -> bool {
    INSTALLER_MARKERS.iter().any(|marker| line.contains(marker))
}

fn first_match(regex: &Regex, text: &str) -> Option<String> {
    regex
        .find(text)
        .ok()
        .flatten()
        .map(|m| m.as_str().to_string())
}

fn first_group(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .ok()
        .flatten()
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
}

/// Extract installer failures: lines containing `Return value 3` (the MSI
/// action failure marker) or `Error`.
pub fn parse_installer_lines(lines: &[LogLine]) -> Vec<InstallerError> {
    lines
        .iter()
        .filter(|line| line.text.contains(RETURN_VALUE_3) || line.text.contains("Error"))
        .map(|line| InstallerError {
            line: line.line_number,
            raw: line.text.trim().to_string(),
            timestamp: first_match(&CLOCK, &line.text),
            error_code: first_group(&ERROR_CODE, &line.text),
            action: first_group(&ACTION, &line.text),
            return_value_3: line.text.contains(RETURN_VALUE_3),
        })
        .collect()
}
