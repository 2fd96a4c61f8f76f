//! Upstream forwarder.
//!
//! # Responsibility
//! - Re-issue inbound requests against the configured analysis backend.
//! - Relay the upstream status and body unchanged, streaming throughout.
//!
//! # Invariants
//! - Response bodies are never buffered: the relay is a pipe over
//!   `bytes_stream`, so event framing and arrival order pass through
//!   untouched and a dropped client tears down the upstream connection.
//! - No retries and no timeouts beyond the platform defaults.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::info;
use serde_json::Value;

/// Thin client over the analysis backend base URL.
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.upstream_base_url.clone(),
        }
    }

    /// Forwards a JSON body via POST and relays the response.
    pub async fn post_json(&self, suffix: &str, body: &Value) -> Result<Response, GatewayError> {
        let response = self.http.post(self.endpoint(suffix)).json(body).send().await?;
        Ok(self.relay(suffix, response, None))
    }

    /// Forwards a JSON body via POST, asking the upstream for a live
    /// event stream and forcing the relayed content type to match.
    pub async fn post_event_stream(
        &self,
        suffix: &str,
        body: &Value,
    ) -> Result<Response, GatewayError> {
        let response = self
            .http
            .post(self.endpoint(suffix))
            .header("Accept", "text/event-stream")
            .json(body)
            .send()
            .await?;
        Ok(self.relay(
            suffix,
            response,
            Some(HeaderValue::from_static("text/event-stream")),
        ))
    }

    /// Re-submits a multipart form via POST and relays the response.
    pub async fn post_multipart(
        &self,
        suffix: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response, GatewayError> {
        let response = self
            .http
            .post(self.endpoint(suffix))
            .multipart(form)
            .send()
            .await?;
        Ok(self.relay(suffix, response, None))
    }

    /// Forwards a GET and relays the response.
    pub async fn get(&self, suffix: &str) -> Result<Response, GatewayError> {
        let response = self.http.get(self.endpoint(suffix)).send().await?;
        Ok(self.relay(suffix, response, None))
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/{}", self.base_url, suffix.trim_start_matches('/'))
    }

    // Status and body pass through verbatim; only the content type is
    // copied from the upstream (hop-by-hop headers must not be).
    fn relay(
        &self,
        suffix: &str,
        response: reqwest::Response,
        content_type_override: Option<HeaderValue>,
    ) -> Response {
        let status = response.status();
        info!(
            "event=proxy_forward module=gateway status=ok suffix={suffix} upstream_status={}",
            status.as_u16()
        );
        let content_type =
            content_type_override.or_else(|| response.headers().get(CONTENT_TYPE).cloned());

        let mut relayed = Response::builder()
            .status(status)
            .body(Body::from_stream(response.bytes_stream()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
        if let Some(value) = content_type {
            relayed.headers_mut().insert(CONTENT_TYPE, value);
        }
        relayed
    }
}
