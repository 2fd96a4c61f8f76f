//! Domain model for claim-chart documents.
//!
//! # Responsibility
//! - Define the canonical document record owned by the store.
//! - Keep persisted field names aligned with the editor's external schema.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Deletion is permanent removal; there is no tombstone state.

pub mod document;
