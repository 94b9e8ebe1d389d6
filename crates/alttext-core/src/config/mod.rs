//! Configuration management.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults; a missing file is not an error. All config structs implement
//! `Default` and deserialize with `#[serde(default)]` so partial files work.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web server settings
    pub server: ServerConfig,

    /// Captioning settings
    pub captioning: CaptioningConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Captioning provider settings
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.alttext.alttext/config.toml
    /// - Linux: ~/.config/alttext/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\alttext\config\config.toml
    ///
    /// Falls back to ~/.alttext/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "alttext", "alttext")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".alttext").join("config.toml")
            })
    }

    /// Address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
