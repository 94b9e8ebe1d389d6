//! Error types for alt-text generation.
//!
//! Per-source failures (fetch, decode, caption) are kept separate from
//! caller-level failures (config, export) so the batch loop can convert the
//! former into result rows without ever aborting the batch.

use thiserror::Error;

/// Top-level error type for alttext operations.
#[derive(Error, Debug)]
pub enum AltTextError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-source processing errors
    #[error("{0}")]
    Source(#[from] SourceError),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures while processing a single image source, organized by stage.
///
/// Every variant is rendered into the failed result's diagnostic text; none
/// of them escapes the batch loop.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network fetch failed before a response arrived
    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// A stage exceeded its time budget
    #[error("{stage} timed out for {src} after {timeout_ms}ms")]
    Timeout {
        src: String,
        stage: String,
        timeout_ms: u64,
    },

    /// Image bytes could not be decoded
    #[error("decode failed for {src}: {message}")]
    Decode { src: String, message: String },

    /// Image dimensions exceed the configured limit
    #[error("image too large: {src} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        src: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// The captioning provider failed or returned nothing usable
    #[error("caption generation failed: {message}")]
    Caption { message: String },
}

/// Convenience type alias for alttext results.
pub type Result<T> = std::result::Result<T, AltTextError>;

/// Convenience type alias for per-source results.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
