//! `RcaCrab` - Rule-based log triage and root-cause analysis
//!
//! Copyright (C) 2026 Daniel Freiermuth
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.
pub mod anomaly;
pub mod config;
pub mod core;
pub mod error;
pub mod feedback;
pub mod parser;

pub use crate::config::AnalyzerConfig;
pub use crate::core::{AnalysisBundle, Analyzer, RuleSet, SourceReport};
pub use crate::error::{ConfigError, IngestError};
