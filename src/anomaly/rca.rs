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

//! Keyword root-cause classification.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootCauseLabel {
    #[serde(rename = "Network Issue")]
    NetworkIssue,
    #[serde(rename = "Security/Permission")]
    SecurityPermission,
    #[serde(rename = "Storage I/O")]
    StorageIo,
    #[serde(rename = "Code Defect")]
    CodeDefect,
    #[serde(rename = "Resource Exhaustion")]
    ResourceExhaustion,
    #[serde(rename = "Unclassified")]
    Unclassified,
}

impl RootCauseLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkIssue => "Network Issue",
            Self::SecurityPermission => "Security/Permission",
            Self::StorageIo => "Storage I/O",
            Self::CodeDefect => "Code Defect",
            Self::ResourceExhaustion => "Resource Exhaustion",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for RootCauseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any of `keywords` (lowercase) in the message selects `label`.
#[derive(Debug, Clone, Copy)]
pub struct RcaRule {
    pub keywords: &'static [&'static str],
    pub label: RootCauseLabel,
}

impl RcaRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Stock rules. Order is the tie-break: "disk timeout" is a network issue.
pub const DEFAULT_RCA_RULES: &[RcaRule] = &[
    RcaRule {
        keywords: &["timeout", "unreachable"],
        label: RootCauseLabel::NetworkIssue,
    },
    RcaRule {
        keywords: &["permission denied", "access is denied"],
        label: RootCauseLabel::SecurityPermission,
    },
    RcaRule {
        keywords: &["disk", "io error"],
        label: RootCauseLabel::StorageIo,
    },
    RcaRule {
        keywords: &["nullreference", "undefined"],
        label: RootCauseLabel::CodeDefect,
    },
    RcaRule {
        keywords: &["outofmemory"],
        label: RootCauseLabel::ResourceExhaustion,
    },
];

/// First-match-wins classifier over an ordered rule list.
#[derive(Debug, Clone, Copy)]
pub struct RcaClassifier {
    rules: &'static [RcaRule],
}

impl RcaClassifier {
    pub const fn new(rules: &'static [RcaRule]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, message: &str) -> RootCauseLabel {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(RootCauseLabel::Unclassified, |rule| rule.label)
    }
}

impl Default for RcaClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RCA_RULES)
    }
}

/// Classify with the stock rules.
pub fn classify_root_cause(message: &str) -> RootCauseLabel {
    RcaClassifier::default().classify(message)
}
