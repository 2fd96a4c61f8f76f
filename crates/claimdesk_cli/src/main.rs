//! Smoke binary for the document core.
//!
//! # Responsibility
//! - Link `claimdesk_core` and run one store round trip from the shell.
//! - Print deterministic output so a wiring break is obvious at a glance.

use claimdesk_core::{DocumentStore, MemoryBackend};

fn main() {
    // Exercises the core crate without a gateway or network in the loop.
    println!("claimdesk_core ping={}", claimdesk_core::ping());
    println!("claimdesk_core version={}", claimdesk_core::core_version());

    let mut store = DocumentStore::open(Box::new(MemoryBackend::new()));
    let document = store.create_document(Some("Smoke Check"));
    println!("claimdesk_core store title={}", document.title);
    println!("claimdesk_core store len={}", store.len());
}
