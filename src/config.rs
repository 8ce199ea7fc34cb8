//! Extractor configuration

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min_concept_size must be at least 1")]
    InvalidMinConceptSize,

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options fixed when an extractor is constructed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum number of words for a span to count as a concept
    pub min_concept_size: usize,
    /// Parser model selector, passed through to the parser untouched
    pub model: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_concept_size: 2,
            model: None,
        }
    }
}

impl ExtractorConfig {
    pub fn with_min_concept_size(min_concept_size: usize) -> Self {
        Self {
            min_concept_size,
            ..Self::default()
        }
    }

    /// Load from a JSON object, filling in defaults for missing keys
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_concept_size == 0 {
            return Err(ConfigError::InvalidMinConceptSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractorConfig::from_json("{}").unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.min_concept_size, 2);
        assert_eq!(config.model, None);
    }

    #[test]
    fn test_from_json() {
        let config =
            ExtractorConfig::from_json(r#"{"min_concept_size": 1, "model": "en_core_web_md"}"#)
                .unwrap();
        assert_eq!(config.min_concept_size, 1);
        assert_eq!(config.model.as_deref(), Some("en_core_web_md"));
    }

    #[test]
    fn test_rejects_zero_min_size() {
        let err = ExtractorConfig::from_json(r#"{"min_concept_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMinConceptSize));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = ExtractorConfig::from_json(r#"{"min_concept_size": "two"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
