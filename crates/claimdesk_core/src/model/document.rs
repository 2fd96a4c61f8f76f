//! Document domain model.
//!
//! # Responsibility
//! - Define the canonical record for user-authored claim-chart documents.
//! - Provide lifecycle helpers for creation and mutation timestamps.
//!
//! # Invariants
//! - `id` is stable and never reused for another document.
//! - `created_at` is immutable after creation.
//! - Every field mutation must be followed by `touch()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every document owned by the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DocumentId = Uuid;

/// Title applied when a document is created without one.
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Record discriminant, persisted as `type` to match the editor schema.
///
/// A single variant today; kept as an enum so future artifact kinds
/// (claim charts, comparison reports) extend the same persisted shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Document,
}

/// Canonical user-authored document record.
///
/// `content` is serialized rich-text markup produced by the editor. The
/// store treats it as an opaque blob; only the service layer derives
/// projections from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable global ID used for lookups and persistence keys.
    pub id: DocumentId,
    /// Free-form title; may be empty (the "untitled" state).
    pub title: String,
    /// Opaque rich-text markup blob.
    pub content: String,
    /// Creation timestamp; never changes after construction.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Refreshed by `touch()` on every mutation.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Serialized as `type` to match the external schema.
    #[serde(rename = "type", default)]
    pub kind: DocumentKind,
}

impl Document {
    /// Creates a new document with a generated stable ID.
    ///
    /// Both timestamps are set to now.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a new document with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: DocumentId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
            kind: DocumentKind::Document,
        }
    }

    /// Refreshes `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial update for `title` and/or `content`.
///
/// `id`, `created_at` and `kind` are deliberately not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DocumentPatch {
    /// Patch that replaces only the title.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            content: None,
        }
    }

    /// Patch that replaces only the content blob.
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            title: None,
        }
    }

    /// Merges the present fields into `document` without touching timestamps.
    pub fn apply(&self, document: &mut Document) {
        if let Some(title) = &self.title {
            document.title = title.clone();
        }
        if let Some(content) = &self.content {
            document.content = content.clone();
        }
    }
}

/// Initial markup skeleton for a freshly created document.
pub fn initial_content(title: &str) -> String {
    format!("<h1>{title}</h1><p>Start typing here...</p>")
}

#[cfg(test)]
mod tests {
    use super::{initial_content, Document, DocumentKind, DocumentPatch};

    #[test]
    fn new_document_starts_with_equal_timestamps() {
        let doc = Document::new("Chart A", "<p>body</p>");
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.kind, DocumentKind::Document);
    }

    #[test]
    fn patch_apply_replaces_only_present_fields() {
        let mut doc = Document::new("Chart A", "<p>body</p>");
        DocumentPatch::title("Chart B").apply(&mut doc);
        assert_eq!(doc.title, "Chart B");
        assert_eq!(doc.content, "<p>body</p>");
    }

    #[test]
    fn initial_content_embeds_title_as_heading() {
        let markup = initial_content("US1234567");
        assert!(markup.starts_with("<h1>US1234567</h1>"));
        assert!(markup.ends_with("</p>"));
    }

    #[test]
    fn document_serializes_with_external_field_names() {
        let doc = Document::new("Chart A", "<p>body</p>");
        let value = serde_json::to_value(&doc).expect("document should serialize");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(
            value.get("type").and_then(|v| v.as_str()),
            Some("document")
        );
    }
}
