//! Stateless proxy gateway in front of the external analysis backend.
//!
//! # Responsibility
//! - Forward feature parse/analyze/upload requests to the configured
//!   upstream and relay responses unchanged.
//! - Pipe the comparison event stream through live, without buffering.
//!
//! # Invariants
//! - Each request is independent; no session or connection state is kept.
//! - No retries, no caching, no authentication logic of its own.
//! - Every forward failure surfaces as the `{ok:false,error}` envelope.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use upstream::UpstreamClient;

/// Shared handler state: just the upstream forwarder.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            upstream: Arc::new(UpstreamClient::new(config)),
        }
    }
}

/// Assembles the proxy route table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/features/parse", post(routes::parse_features))
        .route("/api/features/upload", post(routes::upload_files))
        .route("/api/features/analyze", post(routes::start_analyze))
        .route(
            "/api/features/analyze/:task_id",
            get(routes::analyze_progress),
        )
        .route("/api/feature/compare_stream", post(routes::compare_stream))
        // Body size policy belongs to the upstream; comparison uploads
        // routinely exceed the framework default.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
