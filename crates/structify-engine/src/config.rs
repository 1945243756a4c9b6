//! Configuration for the extraction engine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use structify_schema::SynthesizerConfig;

/// Configuration for [`crate::Engine`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single completion call (seconds)
    pub completion_timeout_secs: u64,

    /// Schema name reported to the LLM provider when the request
    /// doesn't override it
    pub schema_name: String,

    /// Token separating few-shot example blocks in an examples document
    pub examples_separator: String,

    /// Synthesizer settings (depth window, strictness)
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,

    /// Where to dump synthesized schemas for inspection, if anywhere
    #[serde(default)]
    pub schema_dump_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            completion_timeout_secs: 120,
            schema_name: "structured_output".to_string(),
            examples_separator: "###".to_string(),
            synthesizer: SynthesizerConfig::default(),
            schema_dump_path: None,
        }
    }
}

impl EngineConfig {
    /// Get the completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.completion_timeout_secs == 0 {
            return Err("completion_timeout_secs must be greater than 0".to_string());
        }
        if self.schema_name.is_empty() {
            return Err("schema_name must not be empty".to_string());
        }
        if self.examples_separator.is_empty() {
            return Err("examples_separator must not be empty".to_string());
        }
        self.synthesizer.validate()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {e}"))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.synthesizer.max_depth, 5);
        assert!(config.synthesizer.strict);
    }

    #[test]
    fn test_invalid_max_text_length() {
        let mut config = EngineConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_separator() {
        let mut config = EngineConfig::default();
        config.examples_separator = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.completion_timeout_secs, parsed.completion_timeout_secs);
        assert_eq!(config.schema_name, parsed.schema_name);
        assert_eq!(config.synthesizer.max_depth, parsed.synthesizer.max_depth);
    }

    #[test]
    fn test_partial_toml_uses_synthesizer_defaults() {
        let config = EngineConfig::from_toml(
            r#"
            max_text_length = 1000
            completion_timeout_secs = 30
            schema_name = "recipe"
            examples_separator = "---"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_text_length, 1000);
        assert_eq!(config.synthesizer.max_depth, 5);
        assert!(config.schema_dump_path.is_none());
    }
}
