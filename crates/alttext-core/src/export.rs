//! CSV export of caption results.
//!
//! Produces a UTF-8 buffer: one header row, then one row per result in
//! input order. Quoting follows the csv crate's RFC 4180 behavior, so
//! values containing commas, quotes, or newlines come out escaped.

use csv::WriterBuilder;

use crate::error::Result;
use crate::types::CaptionResult;

/// The fixed filename offered for the downloadable artifact.
pub const CSV_FILENAME: &str = "alt_text_results.csv";

/// Header row variant, one per input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvHeader {
    /// URL mode: `image_url,alt_text`
    Urls,
    /// Upload mode: `filename,alt_text`
    Uploads,
}

impl CsvHeader {
    fn columns(self) -> [&'static str; 2] {
        match self {
            CsvHeader::Urls => ["image_url", "alt_text"],
            CsvHeader::Uploads => ["filename", "alt_text"],
        }
    }
}

/// Serialize results to a two-column CSV buffer.
pub fn to_csv(results: &[CaptionResult], header: CsvHeader) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(header.columns())?;
    for result in results {
        writer.write_record([result.source.as_str(), result.text().as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}
