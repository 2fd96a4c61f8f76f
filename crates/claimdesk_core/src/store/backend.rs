//! Persistence backends for the document store.
//!
//! # Responsibility
//! - Serialize the full document set as one JSON object keyed by id.
//! - Keep file-system details out of the store itself.
//!
//! # Invariants
//! - `load` never fails the caller: missing or corrupt state degrades to an
//!   empty set.
//! - `save` replaces the persisted set atomically from the caller's view
//!   (one write of the whole object).

use crate::model::document::{Document, DocumentId};
use crate::store::StoreResult;
use log::{error, info};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Storage seam between the observable store and its durable copy.
pub trait StorageBackend {
    /// Loads the persisted document set.
    ///
    /// Unreadable or corrupt state must degrade to an empty set so a broken
    /// backing file never prevents startup.
    fn load(&self) -> HashMap<DocumentId, Document>;

    /// Persists the full document set, replacing any previous state.
    fn save(&self, documents: &HashMap<DocumentId, Document>) -> StoreResult<()>;
}

/// File-backed storage: one JSON object keyed by document id.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> HashMap<DocumentId, Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                // Missing file is the normal first-run case; anything else
                // still degrades to an empty store per the load contract.
                if err.kind() != std::io::ErrorKind::NotFound {
                    error!(
                        "event=store_load module=store status=error path={} error={err}",
                        self.path.display()
                    );
                }
                return HashMap::new();
            }
        };

        match serde_json::from_str::<HashMap<DocumentId, Document>>(&raw) {
            Ok(documents) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    documents.len()
                );
                documents
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error path={} error_code=corrupt_state error={err}",
                    self.path.display()
                );
                HashMap::new()
            }
        }
    }

    fn save(&self, documents: &HashMap<DocumentId, Document>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string(documents)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// No-op persistence for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl MemoryBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> HashMap<DocumentId, Document> {
        HashMap::new()
    }

    fn save(&self, _documents: &HashMap<DocumentId, Document>) -> StoreResult<()> {
        Ok(())
    }
}
