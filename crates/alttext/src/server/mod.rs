//! Web server: router, shared state, and HTTP error mapping.
//!
//! The form UI and its three input modes (single URL, batch URLs, file
//! uploads) are the only outward surface; everything behind them goes
//! through the shared `BatchCaptioner`.

mod routes;
mod ui;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use alttext_core::BatchCaptioner;

/// Shared application state: the batch captioner (holding the provider
/// handle created once at startup) plus request defaults.
#[derive(Clone)]
pub struct AppState {
    pub batch: Arc<BatchCaptioner>,
    pub default_max_words: usize,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    // Uploads carry whole images; the axum default body cap is too small
    const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

    Router::new()
        .route("/", get(ui::index))
        .route("/api/caption", post(routes::caption_url))
        .route("/api/batch", post(routes::caption_batch))
        .route("/api/upload", post(routes::caption_upload))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Nothing to process: no non-blank URLs, no files
    #[error("{0}")]
    EmptyInput(String),

    /// Malformed multipart payload
    #[error("Invalid upload: {0}")]
    Multipart(String),

    /// Anything else (CSV serialization, IO)
    #[error(transparent)]
    Internal(#[from] alttext_core::AltTextError),
}

/// JSON error body.
#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::EmptyInput(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alttext_core::caption::{CaptionRequest, CaptionResponse, Captioner};
    use alttext_core::config::LimitsConfig;
    use alttext_core::SourceError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct StaticCaptioner(&'static str);

    #[async_trait]
    impl Captioner for StaticCaptioner {
        fn name(&self) -> &str {
            "static"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn generate(
            &self,
            _request: &CaptionRequest,
        ) -> Result<CaptionResponse, SourceError> {
            Ok(CaptionResponse {
                text: self.0.to_string(),
                model: "static-v1".to_string(),
                latency_ms: 1,
            })
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn test_router(caption: &'static str) -> Router {
        let batch = Arc::new(BatchCaptioner::new(
            Arc::new(StaticCaptioner(caption)),
            &LimitsConfig::default(),
        ));
        router(AppState {
            batch,
            default_max_words: 20,
        })
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    /// Assemble a multipart body with one file part per (name, bytes) pair.
    fn multipart_body(boundary: &str, files: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (filename, bytes) in files {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }

    #[tokio::test]
    async fn test_index_serves_form_page() {
        let response = test_router("x")
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Alt Text Generator"));
        assert!(html.contains("/api/upload"));
    }

    #[tokio::test]
    async fn test_batch_with_only_blank_urls_is_400() {
        let response = test_router("x")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/batch")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from("urls=%0A%20%20%0A"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_single_caption_blank_url_is_400() {
        let response = test_router("x")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/caption")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from("url=%20%20"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_returns_captions_as_json() {
        let boundary = "test-boundary-7f3a";
        let body = multipart_body(boundary, &[("cat.png", tiny_png())]);

        let response = test_router("a tabby cat")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["source"], "cat.png");
        assert_eq!(rows[0]["alt_text"], "a tabby cat");
    }

    #[tokio::test]
    async fn test_upload_csv_download_has_fixed_filename() {
        let boundary = "test-boundary-9c1d";
        let body = multipart_body(
            boundary,
            &[("one.png", tiny_png()), ("two.png", tiny_png())],
        );

        let response = test_router("a chair")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload?format=csv")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("alt_text_results.csv"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "filename,alt_text");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("one.png,"));
        assert!(lines[2].starts_with("two.png,"));
    }

    #[tokio::test]
    async fn test_upload_with_no_files_is_400() {
        let boundary = "test-boundary-empty";
        let body = multipart_body(boundary, &[]);

        let response = test_router("x")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_undecodable_file_yields_error_row() {
        let boundary = "test-boundary-junk";
        let body = multipart_body(boundary, &[("junk.png", b"not an image".to_vec())]);

        let response = test_router("unused")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        // Per-source failures are rows, not HTTP errors
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        let text = rows[0]["alt_text"].as_str().unwrap();
        assert!(text.starts_with("Error: "), "{text}");
    }
}
