//! Analyzer configuration.
//!
//! Keyword vocabulary, cue phrases, and the grace/lead periods are data, not
//! code: they ship with defaults matching the fixed tables in `cues` and
//! `resolve`, and can be overridden from a TOML file so new phrases are a
//! config change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cues::default_keywords;
use crate::error::ConfigError;
use crate::resolve::{default_cue_patterns, AGENDA_LEAD_DAYS, GRACE_PERIOD_DAYS};

/// Tunable knobs of the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Keyword vocabulary, in priority order.
    pub keywords: Vec<String>,
    /// Deadline-cue patterns (regular expressions over lower-cased text).
    pub cue_phrases: Vec<String>,
    /// Days added to "today" when no deadline signal exists.
    pub grace_period_days: u64,
    /// Days the agenda reminder precedes a detected deadline.
    pub agenda_lead_days: u64,
    /// Directory holding `model.onnx` + `tokenizer.json` for the NER
    /// fallback. `None` leaves the AI path unavailable.
    pub model_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            cue_phrases: default_cue_patterns(),
            grace_period_days: GRACE_PERIOD_DAYS,
            agenda_lead_days: AGENDA_LEAD_DAYS,
            model_dir: None,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a config from TOML text. Missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_fixed_vocabulary() {
        let config = AnalyzerConfig::default();
        assert!(config.keywords.iter().any(|k| k == "plazo"));
        assert!(config.cue_phrases.iter().any(|c| c == "hasta"));
        assert_eq!(config.grace_period_days, 2);
        assert_eq!(config.agenda_lead_days, 2);
        assert!(config.model_dir.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
            grace_period_days = 3
            keywords = ["urgente", "plazo"]
            "#,
        )
        .unwrap();
        assert_eq!(config.grace_period_days, 3);
        assert_eq!(config.keywords, vec!["urgente", "plazo"]);
        // Untouched fields keep their defaults.
        assert_eq!(config.agenda_lead_days, 2);
        assert!(!config.cue_phrases.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AnalyzerConfig::from_toml_str("keywords = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plazo.toml");
        std::fs::write(&path, "agenda_lead_days = 1\n").unwrap();

        let config = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(config.agenda_lead_days, 1);

        let err = AnalyzerConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
