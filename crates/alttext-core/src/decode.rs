//! In-memory image decoding with format detection, validation, and timeout.
//!
//! Decoding proves the fetched or uploaded bytes are a real image before any
//! provider call is spent on them, and detects the format used for the
//! provider's media type.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::SourceError;

/// Image decoder with configurable limits and timeout.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an image from an in-memory byte buffer with validation and
    /// timeout.
    ///
    /// `source` is the URL or upload name, used only for diagnostics.
    /// Decoding runs under `spawn_blocking` so a pathological input cannot
    /// stall the async executor; the result is awaited inline.
    pub async fn decode_from_bytes(
        &self,
        bytes: Vec<u8>,
        source: &str,
    ) -> Result<DecodedImage, SourceError> {
        let source_owned = source.to_string();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(timeout_duration, async {
            tokio::task::spawn_blocking(move || Self::decode_bytes_sync(bytes, &source_owned)).await
        })
        .await;

        match decode_result {
            Ok(Ok(Ok(decoded))) => {
                if decoded.width > self.limits.max_image_dimension
                    || decoded.height > self.limits.max_image_dimension
                {
                    return Err(SourceError::ImageTooLarge {
                        src: source.to_string(),
                        width: decoded.width,
                        height: decoded.height,
                        max_dim: self.limits.max_image_dimension,
                    });
                }
                Ok(decoded)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(e)) => Err(SourceError::Decode {
                src: source.to_string(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(SourceError::Timeout {
                src: source.to_string(),
                stage: "decode".to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode from bytes (runs in spawn_blocking).
    fn decode_bytes_sync(bytes: Vec<u8>, source: &str) -> Result<DecodedImage, SourceError> {
        use std::io::Cursor;

        let cursor = Cursor::new(bytes);
        let reader = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| SourceError::Decode {
                src: source.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader.format().ok_or_else(|| SourceError::Decode {
            src: source.to_string(),
            message: "Unrecognized image format".to_string(),
        })?;
        let image = reader.decode().map_err(|e| SourceError::Decode {
            src: source.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        _ => "unknown".to_string(),
    }
}

/// A valid 2x2 PNG generated in memory, shared by decode and batch tests.
#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([120, 200, 40]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
