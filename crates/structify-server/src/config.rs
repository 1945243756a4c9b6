//! Configuration file parsing for the server
//!
//! Loads settings from a TOML file, then applies `STRUCTIFY_*`
//! environment overrides so deployments can inject the bind address
//! and API key without editing files.

use serde::Deserialize;
use std::path::Path;
use structify_engine::EngineConfig;
use structify_llm::openai::DEFAULT_ENDPOINT;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A nested section failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML plus environment overrides
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// LLM provider settings
    pub llm: LlmSettings,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

/// LLM provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Chat completions endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model to query (e.g., "gpt-4o-2024-08-06")
    pub model: String,

    /// API key; usually injected via `STRUCTIFY_LLM_API_KEY`
    #[serde(default)]
    pub api_key: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file and apply environment
    /// overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: ServerConfig = toml::from_str(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `STRUCTIFY_*` environment variables over the loaded values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(address) = std::env::var("STRUCTIFY_BIND_ADDRESS") {
            self.bind_address = address;
        }
        if let Ok(port) = std::env::var("STRUCTIFY_BIND_PORT") {
            if let Ok(port) = port.parse() {
                self.bind_port = port;
            }
        }
        if let Ok(endpoint) = std::env::var("STRUCTIFY_LLM_ENDPOINT") {
            self.llm.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("STRUCTIFY_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(api_key) = std::env::var("STRUCTIFY_LLM_API_KEY") {
            self.llm.api_key = api_key;
        }
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }
        if self.llm.api_key.is_empty() {
            return Err(ConfigError::MissingField("llm.api_key".to_string()));
        }
        self.engine.validate().map_err(ConfigError::Invalid)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            llm: LlmSettings {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                model: "gpt-4o-2024-08-06".to_string(),
                api_key: "test-key-do-not-use-in-production".to_string(),
            },
            engine: EngineConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
