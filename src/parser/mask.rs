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

//! Ordered substring masking.
//!
//! The redactor, the baseline diff and the template suggester all replace
//! volatile or sensitive substrings with fixed tokens. They share this
//! mechanism but each brings its own ordered category list, since their
//! tokens and pattern shapes differ.

use fancy_regex::{NoExpand, Regex};

/// One masking category: every match of `pattern` becomes `token`.
#[derive(Debug, Clone)]
pub struct MaskRule {
    pub label: String,
    pub pattern: Regex,
    pub token: String,
}

impl MaskRule {
    pub fn new(label: impl Into<String>, pattern: Regex, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern,
            token: token.into(),
        }
    }

    /// Compile a pattern known to be valid at build time.
    pub fn from_literal(label: &str, pattern: &str, token: &str) -> Self {
        Self::new(
            label,
            Regex::new(pattern).expect("valid regex literal"),
            token,
        )
    }
}

/// An ordered list of [`MaskRule`]s. Each rule runs over the output of the
/// previous one, so overlaps are settled by position in the list.
#[derive(Debug, Clone, Default)]
pub struct Masker {
    rules: Vec<MaskRule>,
}

impl Masker {
    pub const fn new(rules: Vec<MaskRule>) -> Self {
        Self { rules }
    }

    /// Apply every rule once, in order.
    #[must_use]
    pub fn apply(&self, line: &str) -> String {
        let mut masked = line.to_string();
        for rule in &self.rules {
            masked = rule
                .pattern
                .replace_all(&masked, NoExpand(&rule.token))
                .into_owned();
        }
        masked
    }

    #[must_use]
    pub fn apply_all<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines.iter().map(|line| self.apply(line.as_ref())).collect()
    }
}
