//! Caption endpoints for the three input modes, JSON or CSV out.

use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use axum::Form;
use serde::{Deserialize, Serialize};

use alttext_core::{to_csv, CaptionResult, CsvHeader, ImageSource, CSV_FILENAME};

use super::{AppError, AppState};

/// Form body for the single-URL mode.
#[derive(Deserialize)]
pub(super) struct CaptionForm {
    url: String,
    #[serde(default)]
    max_words: Option<usize>,
}

/// Form body for the batch-URLs mode (one URL per line).
#[derive(Deserialize)]
pub(super) struct BatchForm {
    urls: String,
    #[serde(default)]
    max_words: Option<usize>,
}

/// `?format=csv` selects the downloadable artifact; JSON is the default.
#[derive(Deserialize)]
pub(super) struct FormatQuery {
    #[serde(default)]
    format: Option<String>,
}

/// One result row as returned to the UI.
#[derive(Serialize)]
pub(super) struct ResultRow {
    source: String,
    alt_text: String,
}

impl From<&CaptionResult> for ResultRow {
    fn from(result: &CaptionResult) -> Self {
        Self {
            source: result.source.clone(),
            alt_text: result.text(),
        }
    }
}

/// POST /api/caption — caption a single image URL.
pub(super) async fn caption_url(
    State(state): State<AppState>,
    Form(form): Form<CaptionForm>,
) -> Result<Json<ResultRow>, AppError> {
    let url = form.url.trim();
    if url.is_empty() {
        return Err(AppError::EmptyInput("No image URL provided".to_string()));
    }

    let sources = vec![ImageSource::Url(url.to_string())];
    let results = state
        .batch
        .process(&sources, resolve_max_words(form.max_words, &state))
        .await;

    // One non-blank source in, exactly one row out
    let row = results
        .first()
        .map(ResultRow::from)
        .ok_or_else(|| AppError::EmptyInput("No image URL provided".to_string()))?;
    Ok(Json(row))
}

/// POST /api/batch — caption a multi-line list of image URLs.
pub(super) async fn caption_batch(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    Form(form): Form<BatchForm>,
) -> Result<Response, AppError> {
    let sources = ImageSource::from_url_lines(&form.urls);
    if sources.is_empty() {
        return Err(AppError::EmptyInput(
            "No image URLs provided — enter one URL per line".to_string(),
        ));
    }

    let results = state
        .batch
        .process(&sources, resolve_max_words(form.max_words, &state))
        .await;
    respond(&results, CsvHeader::Urls, query.format.as_deref())
}

/// POST /api/upload — caption uploaded image files (multipart).
pub(super) async fn caption_upload(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut sources = Vec::new();
    let mut max_words = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        if field.name() == Some("max_words") {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Multipart(e.to_string()))?;
            max_words = text.trim().parse::<usize>().ok();
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(e.to_string()))?
            .to_vec();
        sources.push(ImageSource::Upload { name, bytes });
    }

    if sources.is_empty() {
        return Err(AppError::EmptyInput("No files uploaded".to_string()));
    }

    let results = state
        .batch
        .process(&sources, resolve_max_words(max_words, &state))
        .await;
    respond(&results, CsvHeader::Uploads, query.format.as_deref())
}

fn resolve_max_words(requested: Option<usize>, state: &AppState) -> usize {
    requested.unwrap_or(state.default_max_words).max(1)
}

/// Render results as JSON rows or as the CSV download artifact.
fn respond(
    results: &[CaptionResult],
    csv_header: CsvHeader,
    format: Option<&str>,
) -> Result<Response, AppError> {
    match format {
        Some("csv") => {
            let buf = to_csv(results, csv_header)?;
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{CSV_FILENAME}\""),
                ),
            ];
            Ok((headers, buf).into_response())
        }
        _ => {
            let rows: Vec<ResultRow> = results.iter().map(ResultRow::from).collect();
            Ok(Json(rows).into_response())
        }
    }
}
