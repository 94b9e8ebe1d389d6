//! Core data types for alt-text batch captioning.

use serde::{Deserialize, Serialize};

/// A single image input, either referenced by URL or supplied in memory.
///
/// Immutable and caller-supplied; the batch captioner never mutates sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image fetched over HTTP at caption time
    Url(String),

    /// Image bytes already in memory (file upload), with a display name
    Upload { name: String, bytes: Vec<u8> },
}

impl ImageSource {
    /// The identifier written into the result row: the URL, or the upload's
    /// display name.
    pub fn id(&self) -> &str {
        match self {
            ImageSource::Url(url) => url,
            ImageSource::Upload { name, .. } => name,
        }
    }

    /// Whether this source is a blank URL entry (skipped, no result row).
    pub fn is_blank(&self) -> bool {
        matches!(self, ImageSource::Url(url) if url.trim().is_empty())
    }

    /// Parse a multi-line URL input into one source per non-blank line.
    ///
    /// Lines are trimmed; blank and whitespace-only lines are dropped here,
    /// matching the skip rule in the batch loop.
    pub fn from_url_lines(input: &str) -> Vec<ImageSource> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ImageSource::Url(line.to_string()))
            .collect()
    }
}

/// The outcome of captioning one source: a generated caption (already
/// word-capped) or a failure diagnostic. One failure never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum CaptionOutcome {
    Caption(String),
    Failed(String),
}

/// One result row: the source identifier paired with its outcome.
///
/// Exactly one of these is produced per non-blank input source, in input
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionResult {
    /// URL or upload display name
    pub source: String,

    /// Caption or failure diagnostic
    pub outcome: CaptionOutcome,
}

impl CaptionResult {
    /// Build a success row.
    pub fn caption(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            outcome: CaptionOutcome::Caption(text.into()),
        }
    }

    /// Build a failure row from a diagnostic message (without prefix).
    pub fn failed(source: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            outcome: CaptionOutcome::Failed(diagnostic.into()),
        }
    }

    /// The text column as exported: the caption verbatim, or the diagnostic
    /// with an `Error: ` prefix.
    pub fn text(&self) -> String {
        match &self.outcome {
            CaptionOutcome::Caption(text) => text.clone(),
            CaptionOutcome::Failed(diag) => format!("Error: {diag}"),
        }
    }

    /// Whether this row is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, CaptionOutcome::Failed(_))
    }
}
