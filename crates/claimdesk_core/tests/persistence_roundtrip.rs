use claimdesk_core::{
    DocumentPatch, DocumentStore, JsonFileBackend, StorageBackend,
};
use std::fs;

#[test]
fn reopened_store_reproduces_documents_exactly() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let path = dir.path().join("documents.json");

    let mut store = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    let a = store.create_document(Some("Chart A"));
    let b = store.create_document(Some("Chart B"));
    store.update_document(a.id, &DocumentPatch::content("<p>revised</p>"));
    let expected = store.all_documents();
    drop(store);

    let reopened = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.all_documents(), expected);

    let a_loaded = reopened.get_document(a.id).expect("a should survive");
    assert_eq!(a_loaded.content, "<p>revised</p>");
    assert_eq!(a_loaded.created_at, a.created_at);
    let b_loaded = reopened.get_document(b.id).expect("b should survive");
    assert_eq!(b_loaded.title, "Chart B");
}

#[test]
fn persisted_layout_is_one_object_keyed_by_id_with_external_names() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let path = dir.path().join("documents.json");

    let mut store = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    let doc = store.create_document(Some("Chart A"));
    drop(store);

    let raw = fs::read_to_string(&path).expect("state file should exist");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("state should be JSON");
    let entry = value
        .get(doc.id.to_string())
        .expect("object should be keyed by document id");

    assert_eq!(entry.get("title").and_then(|v| v.as_str()), Some("Chart A"));
    assert_eq!(
        entry.get("type").and_then(|v| v.as_str()),
        Some("document")
    );
    // Timestamps persist as ISO strings, not numbers.
    assert!(entry
        .get("createdAt")
        .and_then(|v| v.as_str())
        .is_some_and(|s| s.contains('T')));
    assert!(entry
        .get("updatedAt")
        .and_then(|v| v.as_str())
        .is_some_and(|s| s.contains('T')));
}

#[test]
fn corrupt_state_file_degrades_to_empty_store() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let path = dir.path().join("documents.json");
    fs::write(&path, "{not json").expect("corrupt file should write");

    let store = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    assert!(store.is_empty());
}

#[test]
fn missing_state_file_starts_empty() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let path = dir.path().join("never-written.json");

    let store = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    assert!(store.is_empty());
}

#[test]
fn save_failure_keeps_mutation_and_notification_alive() {
    // A directory path cannot be written as a file, so every save fails.
    let dir = tempfile::tempdir().expect("temp dir should create");
    let mut store = DocumentStore::open(Box::new(JsonFileBackend::new(dir.path())));

    use std::cell::RefCell;
    use std::rc::Rc;
    let count = Rc::new(RefCell::new(0_u32));
    let observed = Rc::clone(&count);
    store.subscribe(move || {
        *observed.borrow_mut() += 1;
    });

    let doc = store.create_document(Some("Chart A"));

    assert!(store.get_document(doc.id).is_some());
    assert_eq!(*count.borrow(), 1);
    assert!(store.last_save_error().is_some());
    assert!(store.flush().is_err());
}

#[test]
fn flush_clears_recorded_error_after_successful_write() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let path = dir.path().join("documents.json");

    let mut store = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    store.create_document(Some("Chart A"));
    assert!(store.last_save_error().is_none());
    store.flush().expect("flush should succeed on a writable path");
}

#[test]
fn backend_save_then_load_roundtrips_directly() {
    let dir = tempfile::tempdir().expect("temp dir should create");
    let path = dir.path().join("documents.json");
    let backend = JsonFileBackend::new(&path);

    let mut store = DocumentStore::open(Box::new(JsonFileBackend::new(&path)));
    store.create_document(Some("Chart A"));
    let expected_len = store.len();
    drop(store);

    let loaded = backend.load();
    assert_eq!(loaded.len(), expected_len);
}
