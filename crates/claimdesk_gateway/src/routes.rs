//! Proxy route handlers.
//!
//! # Responsibility
//! - Decode the inbound body just enough to re-issue it upstream in the
//!   same shape (JSON re-serialized, forms re-submitted as multipart).
//! - Relay upstream responses verbatim; surface failures as the envelope.
//!
//! # Invariants
//! - Handlers hold no state between requests.
//! - Payload contents are never validated here; the upstream owns them.

use crate::error::GatewayError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use serde_json::Value;

/// `POST /api/features/parse` — claim text multipart form.
pub async fn parse_features(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, GatewayError> {
    let form = rebuild_form(multipart).await?;
    state
        .upstream
        .post_multipart("api/v1/features/parse", form)
        .await
}

/// `POST /api/features/upload` — comparison file multipart upload.
pub async fn upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, GatewayError> {
    let form = rebuild_form(multipart).await?;
    state
        .upstream
        .post_multipart("api/v1/features/upload", form)
        .await
}

/// `POST /api/features/analyze` — starts an analysis task.
pub async fn start_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let payload = decode_json(&body)?;
    state
        .upstream
        .post_json("api/v1/features/analyze", &payload)
        .await
}

/// `GET /api/features/analyze/{task_id}` — polls task progress.
pub async fn analyze_progress(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response, GatewayError> {
    state
        .upstream
        .get(&format!("api/v1/features/analyze/{task_id}"))
        .await
}

/// `POST /api/feature/compare_stream` — live comparison event stream.
pub async fn compare_stream(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let payload = decode_json(&body)?;
    state
        .upstream
        .post_event_stream("api/v1/feature/compare_stream", &payload)
        .await
}

fn decode_json(body: &Bytes) -> Result<Value, GatewayError> {
    serde_json::from_slice(body).map_err(|err| GatewayError::InvalidBody(err.to_string()))
}

// Re-encodes the inbound form field by field: file parts keep their name
// and content type, plain fields stay text.
async fn rebuild_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<reqwest::multipart::Form, GatewayError> {
    let mut multipart = multipart.map_err(|err| GatewayError::InvalidBody(err.to_string()))?;
    let mut form = reqwest::multipart::Form::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        let part = match file_name {
            Some(file_name) => {
                let mut part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(file_name);
                if let Some(mime) = content_type {
                    part = part
                        .mime_str(&mime)
                        .map_err(|err| GatewayError::InvalidBody(err.to_string()))?;
                }
                part
            }
            None => {
                let text = String::from_utf8(data.to_vec())
                    .map_err(|err| GatewayError::InvalidBody(err.to_string()))?;
                reqwest::multipart::Part::text(text)
            }
        };
        form = form.part(name, part);
    }

    Ok(form)
}
