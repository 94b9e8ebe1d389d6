//! Sequential batch captioning with per-source failure isolation.
//!
//! The batch captioner walks the input sources in order: fetch (URLs) or
//! take the in-memory bytes (uploads), decode, caption, word-cap. Any stage
//! failure becomes that source's result row; the loop always continues and
//! `process` itself never fails.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::caption::{CaptionRequest, Captioner, ImageInput};
use crate::config::LimitsConfig;
use crate::decode::{format_to_string, ImageDecoder};
use crate::error::SourceError;
use crate::fetch::ImageFetcher;
use crate::text::cap_words;
use crate::types::{CaptionOutcome, CaptionResult, ImageSource};

/// Sequential batch captioner.
///
/// Holds the provider handle created once at startup; construction is cheap
/// and the captioner is shared, so one instance per server is enough.
pub struct BatchCaptioner {
    captioner: Arc<dyn Captioner>,
    fetcher: ImageFetcher,
    decoder: ImageDecoder,
    caption_timeout_ms: u64,
}

impl BatchCaptioner {
    pub fn new(captioner: Arc<dyn Captioner>, limits: &LimitsConfig) -> Self {
        Self {
            captioner,
            fetcher: ImageFetcher::new(limits),
            decoder: ImageDecoder::new(limits.clone()),
            caption_timeout_ms: limits.caption_timeout_ms,
        }
    }

    /// Caption every non-blank source, in input order.
    ///
    /// Returns exactly one result per non-blank source. Blank URL entries
    /// are skipped without a result row. `max_words` below 1 is clamped
    /// to 1 (config validation rejects 0 before it gets here).
    pub async fn process(&self, sources: &[ImageSource], max_words: usize) -> Vec<CaptionResult> {
        let max_words = max_words.max(1);
        let mut results = Vec::with_capacity(sources.len());

        for source in sources {
            if source.is_blank() {
                tracing::debug!("skipping blank URL entry");
                continue;
            }

            let outcome = match self.caption_one(source).await {
                Ok(text) => CaptionOutcome::Caption(cap_words(&text, max_words)),
                Err(e) => {
                    tracing::warn!(source = source.id(), error = %e, "source failed");
                    CaptionOutcome::Failed(e.to_string())
                }
            };

            results.push(CaptionResult {
                source: source.id().to_string(),
                outcome,
            });
        }

        results
    }

    /// Run one source through fetch, decode, and caption.
    async fn caption_one(&self, source: &ImageSource) -> Result<String, SourceError> {
        let bytes = match source {
            ImageSource::Url(url) => self.fetcher.fetch(url).await?,
            ImageSource::Upload { bytes, .. } => bytes.clone(),
        };

        let decoded = self
            .decoder
            .decode_from_bytes(bytes.clone(), source.id())
            .await?;

        let input = ImageInput::from_bytes(&bytes, &format_to_string(decoded.format));
        let request = CaptionRequest::alt_text(input);

        let response = match timeout(
            Duration::from_millis(self.caption_timeout_ms),
            self.captioner.generate(&request),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(SourceError::Timeout {
                    src: source.id().to_string(),
                    stage: "caption".to_string(),
                    timeout_ms: self.caption_timeout_ms,
                })
            }
        };

        tracing::debug!(
            source = source.id(),
            model = %response.model,
            latency_ms = response.latency_ms,
            "caption generated"
        );
        Ok(response.text)
    }
}
