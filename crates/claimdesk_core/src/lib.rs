//! Core domain logic for Claimdesk.
//! This crate is the single source of truth for claim-chart document state.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentId, DocumentKind, DocumentPatch};
pub use service::document_service::{
    derive_html_preview, DocumentPreview, DocumentService, DocumentServiceError, HtmlPreview,
};
pub use store::backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use store::document_store::{DocumentStore, SubscriberId};
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
