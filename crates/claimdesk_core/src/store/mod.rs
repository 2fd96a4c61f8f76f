//! Observable document storage.
//!
//! # Responsibility
//! - Own the canonical document set for one session.
//! - Persist the full set through a pluggable backend and notify
//!   subscribers after every successful mutation.
//!
//! # Invariants
//! - Mutation, persistence and notification happen in one synchronous call.
//! - A persistence write failure never aborts the in-memory mutation or the
//!   notify pipeline.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backend;
pub mod document_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for document storage operations.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid document payload: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
