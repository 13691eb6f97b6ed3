//! Extraction route — uploaded document to normalized text.

use std::sync::Arc;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tracing::debug;

use brevia_core::{Error, Result};
use brevia_extract::DocumentFormat;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/extract", post(extract_text))
}

/// POST /api/extract — multipart upload, returns `{ "text": ... }`.
async fn extract_text(mut multipart: Multipart) -> Response {
    // First field carrying a filename is the document; the rest is ignored
    let mut upload = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        match field.bytes().await {
            Ok(bytes) => {
                upload = Some((filename, bytes));
                break;
            }
            Err(e) => {
                return error_response(&Error::Internal(format!("Failed to read upload: {}", e)))
            }
        }
    }

    let Some((filename, bytes)) = upload else {
        return error_response(&Error::NoFile);
    };
    debug!("Extracting {} ({} bytes)", filename, bytes.len());

    match extract_upload(&filename, &bytes) {
        Ok(text) => (StatusCode::OK, Json(serde_json::json!({ "text": text }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Resolve the declared format from the filename and run extraction.
fn extract_upload(filename: &str, bytes: &[u8]) -> Result<String> {
    let format = DocumentFormat::from_filename(filename).ok_or(Error::UnsupportedFormat)?;
    brevia_extract::extract(bytes, format)
}
