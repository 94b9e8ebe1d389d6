//! Captioner trait and request/response types.
//!
//! Defines the interface every caption backend implements, plus the factory
//! that creates the configured provider at startup.

use crate::config::ProvidersConfig;
use crate::error::SourceError;
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;

/// Base64-encoded image ready to send to a caption backend.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and format string.
    ///
    /// The format is the image format identifier (e.g., "jpeg", "png").
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A request to generate alt text for one image.
#[derive(Debug, Clone)]
pub struct CaptionRequest {
    /// The image to describe
    pub image: ImageInput,
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl CaptionRequest {
    /// Build an alt-text request for an image.
    ///
    /// The prompt asks for a single short factual sentence; the word cap is
    /// applied afterwards on our side, so the token budget here is generous.
    pub fn alt_text(image: ImageInput) -> Self {
        Self {
            image,
            prompt: "Write short alt text for this image: one plain factual sentence \
                     naming the main subject and setting. No preamble, no quotes."
                .to_string(),
            max_tokens: 120,
            temperature: 0.2,
        }
    }
}

/// The response from a caption call.
#[derive(Debug, Clone)]
pub struct CaptionResponse {
    /// Generated caption text
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all caption backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn Captioner>` for the shared startup handle).
#[async_trait]
pub trait Captioner: Send + Sync + std::fmt::Debug {
    /// Provider name for logging (e.g., "ollama", "openai").
    fn name(&self) -> &str;

    /// Check whether the provider is configured and reachable.
    async fn is_available(&self) -> bool;

    /// Generate a caption for the given request.
    async fn generate(&self, request: &CaptionRequest) -> Result<CaptionResponse, SourceError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured provider at startup.
pub struct CaptionerFactory;

impl CaptionerFactory {
    /// Create a caption provider based on provider name and config.
    ///
    /// # Arguments
    /// * `provider` - Provider identifier ("ollama" or "openai")
    /// * `config` - The providers config section
    pub fn create(
        provider: &str,
        config: &ProvidersConfig,
    ) -> Result<Box<dyn Captioner>, SourceError> {
        match provider {
            "ollama" => {
                let cfg = config.ollama.clone().unwrap_or_default();
                Ok(Box::new(super::ollama::OllamaCaptioner::new(
                    &cfg.endpoint,
                    &cfg.model,
                )))
            }
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| SourceError::Caption {
                    message: "OpenAI API key not set. Set OPENAI_API_KEY env var.".to_string(),
                })?;
                Ok(Box::new(super::openai::OpenAiCaptioner::new(
                    &api_key, &cfg.model,
                )))
            }
            other => Err(SourceError::Caption {
                message: format!("Unknown caption provider: {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_from_bytes_jpeg() {
        let input = ImageInput::from_bytes(&[0xFF, 0xD8, 0xFF], "jpeg");
        assert_eq!(input.media_type, "image/jpeg");
        assert!(!input.data.is_empty());
    }

    #[test]
    fn test_image_input_from_bytes_png() {
        let input = ImageInput::from_bytes(&[0x89, 0x50, 0x4E, 0x47], "png");
        assert_eq!(input.media_type, "image/png");
    }

    #[test]
    fn test_image_input_data_url() {
        let input = ImageInput::from_bytes(&[1, 2, 3], "jpeg");
        let url = input.data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_alt_text_request_prompt() {
        let image = ImageInput::from_bytes(&[1, 2, 3], "png");
        let request = CaptionRequest::alt_text(image);
        assert!(request.prompt.contains("alt text"));
        assert!(request.temperature < 1.0);
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let err = CaptionerFactory::create("mystery", &ProvidersConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown caption provider"));
    }

    #[test]
    fn test_factory_builds_ollama_without_config_section() {
        let captioner = CaptionerFactory::create("ollama", &ProvidersConfig::default()).unwrap();
        assert_eq!(captioner.name(), "ollama");
    }
}
