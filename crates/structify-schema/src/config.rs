//! Configuration for the synthesizer

use serde::{Deserialize, Serialize};

/// Default maximum template nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Configuration for [`crate::SchemaSynthesizer`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// Maximum template nesting depth accepted by the depth guard
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Whether synthesized schemas are closed-world
    ///
    /// Strict schemas mark every object node `additionalProperties: false`
    /// and set `strict: true` in the response format envelope. Permissive
    /// schemas leave undeclared fields open.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_strict() -> bool {
    true
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: true,
        }
    }
}

impl SynthesizerConfig {
    /// Permissive preset: open-world schemas, same depth window
    pub fn permissive() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SynthesizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 5);
        assert!(config.strict);
    }

    #[test]
    fn test_permissive_preset() {
        let config = SynthesizerConfig::permissive();
        assert!(config.validate().is_ok());
        assert!(!config.strict);
    }

    #[test]
    fn test_zero_max_depth_is_invalid() {
        let config = SynthesizerConfig {
            max_depth: 0,
            ..SynthesizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SynthesizerConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_depth, 5);
        assert!(config.strict);
    }
}
