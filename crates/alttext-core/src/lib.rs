//! Alttext Core - Embeddable alt-text batch captioning library.
//!
//! Takes image sources (URLs or in-memory uploads) and produces one short
//! alt-text description per source by delegating to a pretrained captioning
//! backend, with per-source failure isolation and CSV export.
//!
//! # Architecture
//!
//! ```text
//! Source → Fetch/Bytes → Decode → Caption (provider) → cap_words → CSV
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use alttext_core::{BatchCaptioner, CaptionerFactory, Config, ImageSource};
//!
//! #[tokio::main]
//! async fn main() -> alttext_core::Result<()> {
//!     let config = Config::load()?;
//!     let captioner = CaptionerFactory::create(&config.captioning.provider, &config.providers)?;
//!     let batch = BatchCaptioner::new(Arc::from(captioner), &config.limits);
//!
//!     let sources = ImageSource::from_url_lines("https://example.com/cat.jpg");
//!     let results = batch.process(&sources, config.captioning.max_words).await;
//!     println!("{}", results[0].text());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod batch;
pub mod caption;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod fetch;
pub mod text;
pub mod types;

// Re-exports for convenient access
pub use batch::BatchCaptioner;
pub use caption::{CaptionRequest, CaptionResponse, Captioner, CaptionerFactory, ImageInput};
pub use config::Config;
pub use error::{AltTextError, ConfigError, Result, SourceError, SourceResult};
pub use export::{to_csv, CsvHeader, CSV_FILENAME};
pub use fetch::ImageFetcher;
pub use text::cap_words;
pub use types::{CaptionOutcome, CaptionResult, ImageSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_config_builds_ollama_captioner() {
        let config = Config::default();
        let captioner =
            CaptionerFactory::create(&config.captioning.provider, &config.providers).unwrap();
        assert_eq!(captioner.name(), "ollama");
    }
}
