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

//! Labelled regex rules.
//!
//! One `RuleSet` is shared (read-only) by the signature matcher, the generic
//! text parser and the unmatched collector, so all three agree on what
//! "matches a rule" means.

use crate::error::{ConfigError, ConfigResult};
use fancy_regex::Regex;
use std::collections::BTreeMap;

/// A label bound to a compiled pattern.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub label: String,
    pub pattern: String,
    regex: Regex,
}

impl PatternRule {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> ConfigResult<Self> {
        let label = label.into();
        let pattern = pattern.into();
        let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
            label: label.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            label,
            pattern,
            regex,
        })
    }

    /// Unanchored search. A regex runtime error (backtrack limit) counts as
    /// no match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or(false)
    }
}

/// Rules unique by label, iterated in label order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Compile `(label, pattern)` pairs. Fails on the first invalid pattern
    /// or repeated label.
    pub fn new<I, L, P>(pairs: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        let mut by_label = BTreeMap::new();
        for (label, pattern) in pairs {
            let rule = PatternRule::new(label, pattern)?;
            if by_label.contains_key(&rule.label) {
                return Err(ConfigError::DuplicateLabel(rule.label));
            }
            by_label.insert(rule.label.clone(), rule);
        }
        Ok(Self {
            rules: by_label.into_values().collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Labels of every rule matching `text`, in label order.
    pub fn matching_labels<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.is_match(text))
            .map(|rule| rule.label.as_str())
    }

    pub fn matches_any(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(text))
    }
}
