//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.captioning.max_words == 0 {
            return Err(ConfigError::ValidationError(
                "captioning.max_words must be >= 1".into(),
            ));
        }
        if self.captioning.provider.is_empty() {
            return Err(ConfigError::ValidationError(
                "captioning.provider must not be empty".into(),
            ));
        }
        if self.limits.fetch_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.fetch_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.caption_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.caption_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        Ok(())
    }
}
