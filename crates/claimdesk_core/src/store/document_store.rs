//! Observable document store.
//!
//! # Responsibility
//! - Expose create/update/get/list/delete over the canonical document set.
//! - Run persist-then-notify after every successful mutation.
//!
//! # Invariants
//! - The visible set always equals the set handed to the backend at the
//!   time of the last notification.
//! - `update`/`delete` of an absent id is a silent no-op and never creates
//!   an entry or notifies.
//! - Listeners run in registration order; unsubscribing one listener never
//!   affects the others.

use crate::model::document::{
    initial_content, Document, DocumentId, DocumentPatch, DEFAULT_TITLE,
};
use crate::store::backend::StorageBackend;
use crate::store::{StoreError, StoreResult};
use log::{debug, error, info};
use std::collections::{BTreeMap, HashMap};

/// Handle for deregistering one subscribed listener.
pub type SubscriberId = u64;

/// Single-session store for claim-chart documents.
///
/// Execution is single-threaded by contract: mutation, persistence and
/// subscriber notification complete inside the mutating call, so no
/// listener can observe in-memory and persisted state out of step.
pub struct DocumentStore {
    backend: Box<dyn StorageBackend>,
    documents: HashMap<DocumentId, Document>,
    listeners: BTreeMap<SubscriberId, Box<dyn Fn()>>,
    next_subscriber_id: SubscriberId,
    last_save_error: Option<StoreError>,
}

impl DocumentStore {
    /// Opens a store over the given backend, loading any persisted set.
    ///
    /// A backend that cannot produce its prior state yields an empty store;
    /// startup never fails on a broken backing file.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let documents = backend.load();
        info!(
            "event=store_open module=store status=ok count={}",
            documents.len()
        );
        Self {
            backend,
            documents,
            listeners: BTreeMap::new(),
            next_subscriber_id: 0,
            last_save_error: None,
        }
    }

    /// Creates one document and returns the stored copy.
    ///
    /// `title` defaults to the untitled placeholder; `content` starts as a
    /// markup skeleton derived from the title. Never fails: a persistence
    /// write error is recorded and recoverable via [`Self::flush`].
    pub fn create_document(&mut self, title: Option<&str>) -> Document {
        let title = title.unwrap_or(DEFAULT_TITLE);
        let document = Document::new(title, initial_content(title));
        let id = document.id;
        self.documents.insert(id, document.clone());
        info!("event=doc_create module=store status=ok id={id}");
        self.commit("doc_create");
        document
    }

    /// Merges `patch` into an existing document and refreshes `updated_at`.
    ///
    /// Silently ignored when `id` is absent; an update must never create an
    /// entry as a side effect.
    pub fn update_document(&mut self, id: DocumentId, patch: &DocumentPatch) {
        match self.documents.get_mut(&id) {
            Some(document) => {
                patch.apply(document);
                document.touch();
                self.commit("doc_update");
            }
            None => {
                debug!("event=doc_update module=store status=skipped reason=not_found id={id}");
            }
        }
    }

    /// Point lookup; no side effects.
    pub fn get_document(&self, id: DocumentId) -> Option<Document> {
        self.documents.get(&id).cloned()
    }

    /// Returns all documents ordered by `updated_at` descending, ties
    /// broken by id ascending.
    pub fn all_documents(&self) -> Vec<Document> {
        let mut documents: Vec<Document> = self.documents.values().cloned().collect();
        documents.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        documents
    }

    /// Permanently removes one document; no-op when absent.
    pub fn delete_document(&mut self, id: DocumentId) {
        if self.documents.remove(&id).is_some() {
            info!("event=doc_delete module=store status=ok id={id}");
            self.commit("doc_delete");
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Registers a listener invoked after every successful mutation.
    ///
    /// The returned id deregisters via [`Self::unsubscribe`]; passing it
    /// more than once is harmless.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) -> SubscriberId {
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Deregisters one listener; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.listeners.remove(&id);
    }

    /// Re-attempts persistence of the current set.
    ///
    /// Surfaces the write failure that mutating operations swallow;
    /// clears the recorded error on success.
    pub fn flush(&mut self) -> StoreResult<()> {
        self.backend.save(&self.documents)?;
        self.last_save_error = None;
        Ok(())
    }

    /// Returns the write error recorded by the most recent failed commit.
    pub fn last_save_error(&self) -> Option<&StoreError> {
        self.last_save_error.as_ref()
    }

    // Persist-then-notify in the same synchronous turn as the mutation. A
    // write failure must not stop the in-memory state change or the
    // notifications from completing.
    fn commit(&mut self, event: &str) {
        match self.backend.save(&self.documents) {
            Ok(()) => {
                self.last_save_error = None;
            }
            Err(err) => {
                error!("event={event} module=store status=save_error error={err}");
                self.last_save_error = Some(err);
            }
        }
        for listener in self.listeners.values() {
            listener();
        }
    }
}
