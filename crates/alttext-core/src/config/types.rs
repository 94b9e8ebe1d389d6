//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};

/// Web server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8491,
        }
    }
}

/// Captioning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptioningConfig {
    /// Provider identifier ("ollama" or "openai")
    pub provider: String,

    /// Default maximum words per caption; the UI may override per request
    pub max_words: usize,
}

impl Default for CaptioningConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            max_words: 20,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// URL fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,

    /// Caption generation timeout in milliseconds
    pub caption_timeout_ms: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 20_000,
            decode_timeout_ms: 5_000,
            caption_timeout_ms: 60_000,
            max_image_dimension: 10_000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Captioning provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Ollama (local model server) configuration
    pub ollama: Option<OllamaConfig>,

    /// OpenAI-compatible endpoint configuration
    pub openai: Option<OpenAiConfig>,
}

/// Ollama configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama API endpoint
    pub endpoint: String,

    /// Model name
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llava".to_string(),
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}
