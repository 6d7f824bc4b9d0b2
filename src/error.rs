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

//! Error types.
//!
//! Only two things can go wrong in a run: a source cannot be read, or the
//! configuration (rule file, analyzer config) is unusable. Everything else
//! (unparsable timestamps, lines no rule matches, malformed event records)
//! is a normal outcome with a defined empty or passthrough result.

use std::path::PathBuf;
use thiserror::Error;

/// A source could not be read or an artifact could not be written. Fatal for
/// that source only.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The rule set or analyzer configuration is unusable.
///
/// Surfaced before any detector runs: a broken rule set would otherwise look
/// exactly like a clean log with no findings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported rule file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("rule set is empty")]
    EmptyRuleSet,

    #[error("duplicate rule label: {0}")]
    DuplicateLabel(String),

    #[error("invalid pattern for rule '{label}': {message}")]
    InvalidPattern { label: String, message: String },

    #[error("no rule file configured (pass --rules or set rules_path in the config)")]
    NoRules,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
