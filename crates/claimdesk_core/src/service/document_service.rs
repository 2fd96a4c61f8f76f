//! Document use-case service.
//!
//! # Responsibility
//! - Provide document-specific create/rename/edit/list APIs.
//! - Derive plain-text preview projections from opaque markup blobs.
//!
//! # Invariants
//! - `replace_content` uses full content replacement semantics.
//! - Document lists are always sorted by `updated_at DESC, id ASC`.
//! - Preview derivation never mutates stored content.

use crate::model::document::{Document, DocumentId, DocumentPatch};
use crate::store::document_store::DocumentStore;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static HTML_H1_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid heading regex"));
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static HTML_ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&[a-zA-Z#0-9]+;").expect("valid entity regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 100;

/// Service error for document use-cases.
#[derive(Debug)]
pub enum DocumentServiceError {
    /// Target document does not exist.
    DocumentNotFound(DocumentId),
}

impl Display for DocumentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
        }
    }
}

impl Error for DocumentServiceError {}

/// Markup-derived projection used by list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPreview {
    /// Text of the first top-level heading, if any.
    pub heading: Option<String>,
    /// Sanitized plain-text summary.
    pub snippet: Option<String>,
}

/// List item shape for the document explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPreview {
    pub id: DocumentId,
    /// Stored title, or the first heading when the title is empty.
    pub title: String,
    pub snippet: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Document service facade over the observable store.
pub struct DocumentService {
    store: DocumentStore,
}

impl DocumentService {
    /// Creates a service owning the provided store.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Read access to the underlying store (for subscriptions).
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    /// Creates one document; `None` yields the untitled placeholder.
    pub fn create_document(&mut self, title: Option<&str>) -> Document {
        self.store.create_document(title)
    }

    /// Replaces the title of an existing document.
    pub fn rename_document(
        &mut self,
        id: DocumentId,
        title: impl Into<String>,
    ) -> Result<Document, DocumentServiceError> {
        self.mutate(id, DocumentPatch::title(title))
    }

    /// Replaces the full content blob of an existing document.
    pub fn replace_content(
        &mut self,
        id: DocumentId,
        content: impl Into<String>,
    ) -> Result<Document, DocumentServiceError> {
        self.mutate(id, DocumentPatch::content(content))
    }

    /// Gets one document by stable ID.
    pub fn get_document(&self, id: DocumentId) -> Option<Document> {
        self.store.get_document(id)
    }

    /// Permanently deletes one document; absent ids are ignored.
    pub fn delete_document(&mut self, id: DocumentId) {
        self.store.delete_document(id);
    }

    /// Lists documents with derived preview projections, most recently
    /// modified first.
    pub fn list_previews(&self) -> Vec<DocumentPreview> {
        self.store
            .all_documents()
            .into_iter()
            .map(|document| preview_of(&document))
            .collect()
    }

    // The store's update is a silent no-op for absent ids; the service
    // checks existence first so its callers get a semantic error instead.
    fn mutate(
        &mut self,
        id: DocumentId,
        patch: DocumentPatch,
    ) -> Result<Document, DocumentServiceError> {
        if self.store.get_document(id).is_none() {
            return Err(DocumentServiceError::DocumentNotFound(id));
        }
        self.store.update_document(id, &patch);
        self.store
            .get_document(id)
            .ok_or(DocumentServiceError::DocumentNotFound(id))
    }
}

fn preview_of(document: &Document) -> DocumentPreview {
    let preview = derive_html_preview(&document.content);
    let title = if document.title.is_empty() {
        preview.heading.clone().unwrap_or_default()
    } else {
        document.title.clone()
    };
    DocumentPreview {
        id: document.id,
        title,
        snippet: preview.snippet,
        updated_at: document.updated_at,
    }
}

/// Derives preview fields from an opaque markup blob.
///
/// Rules:
/// - `heading`: inner text of the first `<h1>` element, tags stripped.
/// - `snippet`: tags and entities removed, whitespace normalized, first
///   100 chars retained.
pub fn derive_html_preview(content: &str) -> HtmlPreview {
    let heading = HTML_H1_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| strip_markup(m.as_str())))
        .filter(|value| !value.is_empty());

    let snippet = {
        let text = strip_markup(content);
        if text.is_empty() {
            None
        } else {
            Some(text.chars().take(PREVIEW_MAX_CHARS).collect())
        }
    };

    HtmlPreview { heading, snippet }
}

fn strip_markup(value: &str) -> String {
    let without_tags = HTML_TAG_RE.replace_all(value, " ");
    let without_entities = HTML_ENTITY_RE.replace_all(&without_tags, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_entities, " ");
    normalized.trim().to_string()
}
