//! Ollama caption backend for local vision model inference.
//!
//! Talks to a local Ollama instance via its HTTP API. No authentication
//! required, just needs Ollama running with a vision model pulled.

use super::provider::{CaptionRequest, CaptionResponse, Captioner};
use crate::error::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Caption backend talking to a local Ollama model server.
#[derive(Debug)]
pub struct OllamaCaptioner {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaCaptioner {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

/// Ollama /api/generate request body.
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    images: Vec<String>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama /api/generate response.
#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl Captioner for OllamaCaptioner {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn generate(&self, request: &CaptionRequest) -> Result<CaptionResponse, SourceError> {
        let url = format!("{}/api/generate", self.endpoint);
        let start = Instant::now();

        let body = OllamaRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            images: vec![request.image.data.clone()],
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| SourceError::Caption {
                message: format!("Ollama request failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SourceError::Caption {
                message: format!("Ollama HTTP {status}: {text}"),
            });
        }

        let ollama_resp: OllamaResponse = resp.json().await.map_err(|e| SourceError::Caption {
            message: format!("Failed to parse Ollama response: {e}"),
        })?;

        let text = ollama_resp.response.trim().to_string();
        if text.is_empty() {
            return Err(SourceError::Caption {
                message: "Ollama returned empty response".to_string(),
            });
        }

        Ok(CaptionResponse {
            text,
            model: self.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn timeout(&self) -> Duration {
        // Vision models running locally can be slow
        Duration::from_secs(120)
    }
}
