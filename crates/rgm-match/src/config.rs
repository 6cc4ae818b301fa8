//! TOML configuration for the author matcher.
//!
//! ```toml
//! threshold = 0.85
//! extra_titles = ["sir"]
//! extra_suffixes = ["frs"]
//!
//! [thresholds]
//! high = 0.95
//! medium = 0.85
//! low = 0.60
//!
//! [nicknames]
//! robert = ["robin"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::matcher::{ConfidenceThresholds, DEFAULT_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Minimum score (exclusive) for a best match.
    pub threshold: f64,
    /// Confidence level boundaries used for ranking and reports.
    pub thresholds: ConfidenceThresholds,
    /// Titles stripped in addition to the built-in list.
    pub extra_titles: Vec<String>,
    /// Suffixes stripped in addition to the built-in list.
    pub extra_suffixes: Vec<String>,
    /// Formal name → informal forms, merged with the built-in table.
    pub nicknames: BTreeMap<String, Vec<String>>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            thresholds: ConfidenceThresholds::default(),
            extra_titles: Vec::new(),
            extra_suffixes: Vec::new(),
            nicknames: BTreeMap::new(),
        }
    }
}

impl MatcherConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("threshold", self.threshold)?;
        check_unit("thresholds.high", self.thresholds.high)?;
        check_unit("thresholds.medium", self.thresholds.medium)?;
        check_unit("thresholds.low", self.thresholds.low)?;

        let ConfidenceThresholds { high, medium, low } = self.thresholds;
        if !(low <= medium && medium <= high) {
            return Err(ConfigError::ThresholdOrder { low, medium, high });
        }

        if self.extra_titles.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::BlankEntry {
                field: "extra_titles",
            });
        }
        if self.extra_suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::BlankEntry {
                field: "extra_suffixes",
            });
        }
        for (formal, informal) in &self.nicknames {
            if formal.trim().is_empty() || informal.iter().any(|n| n.trim().is_empty()) {
                return Err(ConfigError::BlankEntry { field: "nicknames" });
            }
        }
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(MatcherConfig::from_toml_str("").unwrap(), MatcherConfig::default());
    }

    #[test]
    fn parses_full_document() {
        let config = MatcherConfig::from_toml_str(
            r#"
threshold = 0.8
extra_titles = ["Sir"]
extra_suffixes = ["FRS"]

[thresholds]
high = 0.9
medium = 0.8
low = 0.5

[nicknames]
robert = ["robin"]
"#,
        )
        .unwrap();
        assert_eq!(config.threshold, 0.8);
        assert_eq!(config.thresholds.low, 0.5);
        assert_eq!(config.extra_titles, vec!["Sir".to_string()]);
        assert_eq!(config.nicknames["robert"], vec!["robin".to_string()]);
    }

    #[test]
    fn partial_thresholds_keep_defaults() {
        let config = MatcherConfig::from_toml_str("[thresholds]\nlow = 0.5\n").unwrap();
        assert_eq!(config.thresholds.low, 0.5);
        assert_eq!(config.thresholds.high, 0.95);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = MatcherConfig::from_toml_str("threshold = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ThresholdOutOfRange {
                name: "threshold",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unordered_levels() {
        let err = MatcherConfig::from_toml_str("[thresholds]\nhigh = 0.5\nmedium = 0.8\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { .. }));
    }

    #[test]
    fn rejects_blank_entries_and_unknown_keys() {
        assert!(matches!(
            MatcherConfig::from_toml_str("extra_titles = [\" \"]").unwrap_err(),
            ConfigError::BlankEntry {
                field: "extra_titles"
            }
        ));
        assert!(matches!(
            MatcherConfig::from_toml_str("treshold = 0.5").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matcher.toml");
        fs::write(&path, "threshold = ").unwrap();
        let err = MatcherConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("matcher.toml"));

        let missing = MatcherConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
