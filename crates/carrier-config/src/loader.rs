//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "carrier.toml",
    "config.toml",
    "./config/carrier.toml",
    "./config/config.toml",
    "/etc/carrier/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    search_standard_paths: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_path: None,
            search_standard_paths: true,
        }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
            search_standard_paths: true,
        }
    }

    /// Skip the standard search paths, using only the explicit path and `CARRIER_CONFIG`
    pub fn without_standard_paths(mut self) -> Self {
        self.search_standard_paths = false;
        self
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Load configuration, reading overrides through `lookup` instead of the process environment
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup) {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        } else {
            debug!("No configuration file found, using defaults");
        }

        self.apply_env_overrides(&mut config, &lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file<F>(&self, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Check explicit path first
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        // Check CARRIER_CONFIG env var
        if let Some(path) = lookup("CARRIER_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if !self.search_standard_paths {
            return None;
        }

        // Search standard paths
        for path in CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(&self, config: &mut AppConfig, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // General
        if let Some(val) = lookup("CARRIER_SERVICE_NAME") {
            config.service_name = val;
        }

        // Logging
        if let Some(val) = lookup("CARRIER_LOG_FORMAT") {
            config.logging.format = val
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("CARRIER_LOG_FORMAT: {}", e)))?;
        }
        if let Some(val) = lookup("CARRIER_LOG_FILTER") {
            config.logging.filter = val;
        }

        // Envelope
        if let Some(val) = lookup("CARRIER_ENVELOPE_LOG_VALIDATION") {
            config.envelope.log_validation_failures = parse_bool("CARRIER_ENVELOPE_LOG_VALIDATION", &val)?;
        }
        if let Some(val) = lookup("CARRIER_ENVELOPE_LOG_EXCEPTIONS") {
            config.envelope.log_exception_failures = parse_bool("CARRIER_ENVELOPE_LOG_EXCEPTIONS", &val)?;
        }
        if let Some(val) = lookup("CARRIER_ENVELOPE_REQUIRE_CHECK_VALUE") {
            config.envelope.require_check_value =
                parse_bool("CARRIER_ENVELOPE_REQUIRE_CHECK_VALUE", &val)?;
        }
        if let Some(val) = lookup("CARRIER_ENVELOPE_CHECK_VALUE_FAILURE_MESSAGE") {
            config.envelope.check_value_failure_message = val;
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}: expected true or false, got '{}'", key, value)))
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
