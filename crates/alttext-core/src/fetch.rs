//! HTTP fetching of image URLs.
//!
//! Read-only GET per URL with a bounded timeout. The response body is
//! streamed into memory chunk by chunk; non-2xx statuses and transport
//! failures surface as per-source errors.

use futures_util::StreamExt;
use std::time::Duration;

use crate::config::LimitsConfig;
use crate::error::SourceError;

/// Fetches image bytes over HTTP with a fixed per-request timeout.
pub struct ImageFetcher {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl ImageFetcher {
    /// Create a fetcher with the configured timeout.
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout_ms: limits.fetch_timeout_ms,
        }
    }

    /// Fetch the body at `url` into memory.
    ///
    /// The timeout covers the whole request including body streaming, so a
    /// stalled transfer cannot hold a batch beyond the budget.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.classify(url, e))?;
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(url, size = bytes.len(), "fetched image");
        Ok(bytes)
    }

    /// Map a reqwest error to the per-source taxonomy: timeouts get their
    /// own variant so the diagnostic names the stage and budget.
    fn classify(&self, url: &str, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout {
                src: url.to_string(),
                stage: "fetch".to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            SourceError::Fetch {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}
