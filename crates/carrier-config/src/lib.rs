//! Carrier Configuration System
//!
//! This crate provides TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use carrier_common::LogSettings;
use carrier_core::EnvelopeConfig;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service name reported when logging starts
    pub service_name: String,

    pub logging: LogSettings,
    pub envelope: EnvelopeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "carrier".to_string(),
            logging: LogSettings::default(),
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load()
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name must not be empty".to_string(),
            ));
        }
        if let Err(e) = self.logging.env_filter() {
            return Err(ConfigError::ValidationError(e.to_string()));
        }
        if self.envelope.require_check_value
            && self.envelope.check_value_failure_message.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "envelope.check_value_failure_message is required when require_check_value is set"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Carrier Configuration
# Environment variables override these settings

service_name = "carrier"

[logging]
format = "text"  # text or json
filter = "info"

[envelope]
log_validation_failures = true
log_exception_failures = true
require_check_value = false
check_value_failure_message = "Integrity check value unavailable"
"#
        .to_string()
    }
}
