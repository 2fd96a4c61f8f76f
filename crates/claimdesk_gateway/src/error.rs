//! Gateway error taxonomy and the single failure envelope.
//!
//! # Responsibility
//! - Classify forward failures (upstream transport vs malformed inbound
//!   body).
//! - Render every failure as HTTP 500 `{ok:false,error}` — the only error
//!   shape this boundary defines.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure while forwarding one request.
#[derive(Debug)]
pub enum GatewayError {
    /// Upstream unreachable or transport failure mid-exchange.
    Upstream(reqwest::Error),
    /// Inbound body could not be decoded in the expected shape.
    InvalidBody(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upstream(err) => write!(f, "upstream request failed: {err}"),
            Self::InvalidBody(message) => write!(f, "invalid request body: {message}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Upstream(err) => Some(err),
            Self::InvalidBody(_) => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        Self::Upstream(value)
    }
}

impl From<axum::extract::multipart::MultipartError> for GatewayError {
    fn from(value: axum::extract::multipart::MultipartError) -> Self {
        Self::InvalidBody(value.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        log::error!("event=proxy_forward module=gateway status=error error={self}");
        let body = Json(json!({ "ok": false, "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::GatewayError;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn envelope_is_500_with_ok_false_and_message() {
        let response = GatewayError::InvalidBody("expected JSON".to_string()).into_response();
        assert_eq!(response.status(), 500);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).expect("envelope should be JSON");
        assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
        assert!(value
            .get("error")
            .and_then(|v| v.as_str())
            .is_some_and(|s| s.contains("expected JSON")));
    }
}
