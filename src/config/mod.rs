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

pub mod rules;

use crate::anomaly::sequence::{EXPECTED_EVENTS, EXPECTED_SEQUENCE};
use crate::anomaly::spike::DEFAULT_THRESHOLD_PER_MINUTE;
use crate::error::{ConfigError, ConfigResult};
use crate::feedback::suggest::DEFAULT_MIN_COUNT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use rules::load_rules;

/// User configuration stored in the config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Milestones the sequence checker looks for, in order
    pub milestones: Vec<String>,

    /// Events an install or boot is expected to log
    pub expected_events: Vec<String>,

    /// Lines per minute above which a minute counts as a spike
    pub spike_threshold: usize,

    /// Occurrences needed before a template is suggested as a rule
    pub template_min_count: usize,

    /// Rule file used when none is given on the command line
    pub rules_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            milestones: EXPECTED_SEQUENCE.iter().map(|s| (*s).to_string()).collect(),
            expected_events: EXPECTED_EVENTS.iter().map(|s| (*s).to_string()).collect(),
            spike_threshold: DEFAULT_THRESHOLD_PER_MINUTE,
            template_min_count: DEFAULT_MIN_COUNT,
            rules_path: None,
        }
    }
}

impl AnalyzerConfig {
    /// Get the path to the user config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rcacrab").join("config.json"))
    }

    /// Load the user config, returning defaults if it is missing or broken
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                tracing::info!("Loading config from {path:?}");
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring config: {e}"),
                }
            } else {
                tracing::info!("No config found, using defaults");
            }
        }

        Self::default()
    }

    /// Load an explicitly named config file. Unlike [`Self::load`], any
    /// problem is an error.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            "Loaded {} milestones and {} expected events",
            config.milestones.len(),
            config.expected_events.len()
        );
        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {e}"))?;

        std::fs::write(path, json).map_err(|e| format!("Failed to write config file: {e}"))?;

        tracing::info!("Saved config to {path:?}");
        Ok(())
    }
}
