//! API configuration, loaded from TOML and validated at load time.
//!
//! ```toml
//! api_prefix = "/api/v1/"
//! channel_buffer = 32
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Path prefix of every resource URI. Starts and ends with `/`.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Request queue capacity of each endpoint actor.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
}

fn default_api_prefix() -> String {
    "/api/v1/".to_string()
}

fn default_channel_buffer() -> usize {
    32
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_prefix: default_api_prefix(),
            channel_buffer: default_channel_buffer(),
        }
    }
}

impl ApiConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_prefix.starts_with('/') || !self.api_prefix.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "api_prefix must start and end with '/', got '{}'",
                self.api_prefix
            )));
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
