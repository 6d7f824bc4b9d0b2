//! Rule files: a flat `label: pattern` mapping in YAML or JSON.

use crate::core::RuleSet;
use crate::error::{ConfigError, ConfigResult};
use std::collections::BTreeMap;
use std::path::Path;

/// Load and compile a rule file. The format follows the extension
/// (`.yml`/`.yaml` or `.json`). A file with no rules is rejected.
pub fn load_rules(path: &Path) -> ConfigResult<RuleSet> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_err = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let mapping: Option<BTreeMap<String, String>> = match extension.as_deref() {
        Some("yml" | "yaml") => serde_yaml::from_str(&contents).map_err(|e| parse_err(e.to_string()))?,
        Some("json") => serde_json::from_str(&contents).map_err(|e| parse_err(e.to_string()))?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    // An empty YAML document deserializes to None
    let mapping = mapping.unwrap_or_default();
    if mapping.is_empty() {
        return Err(ConfigError::EmptyRuleSet);
    }

    let rules = RuleSet::new(mapping)?;
    tracing::info!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}
