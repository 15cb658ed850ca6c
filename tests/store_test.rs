//! Snapshot store tests.

mod common;

use hpworld_signup::models::UserEntry;
use hpworld_signup::store::{SubmissionStore, load_snapshot};

use common::*;

#[tokio::test]
async fn test_snapshot_holds_every_entry_in_order() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("submissions.json");
    let store = SubmissionStore::open(&path);

    let first = UserEntry::new(valid_form());
    let second = UserEntry::new(valid_form());
    let (count, persisted) = store.append(first.clone()).await;
    assert_eq!(count, 1);
    assert!(persisted.is_done());
    let (count, _) = store.append(second.clone()).await;
    assert_eq!(count, 2);

    let saved = load_snapshot(&path).expect("snapshot readable");
    assert_eq!(saved, vec![first, second]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_snapshot_uses_flat_camel_case_records() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("submissions.json");
    let store = SubmissionStore::open(&path);
    let mut form = valid_form();
    form.pin_code = "560001".to_string();
    store.append(UserEntry::new(form)).await;

    let raw = std::fs::read_to_string(&path).expect("snapshot exists");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    let record = &json[0];
    assert_eq!(record["name"], TEST_NAME);
    assert_eq!(record["pinCode"], "560001");
    assert!(record["id"].is_string());
    assert!(record["timestamp"].is_string());
    assert!(record.get("data").is_none());
}

#[tokio::test]
async fn test_open_resumes_from_existing_snapshot() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("submissions.json");
    {
        let store = SubmissionStore::open(&path);
        store.append(UserEntry::new(valid_form())).await;
    }

    let reopened = SubmissionStore::open(&path);
    assert_eq!(reopened.len().await, 1);
    let (count, _) = reopened.append(UserEntry::new(valid_form())).await;
    assert_eq!(count, 2);
    assert_eq!(load_snapshot(&path).expect("readable").len(), 2);
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("submissions.json");
    std::fs::write(&path, "not json at all").expect("write fixture");

    let store = SubmissionStore::open(&path);
    assert!(store.is_empty().await);
    assert!(load_snapshot(&path).is_err());

    // The next append replaces the unreadable file
    store.append(UserEntry::new(valid_form())).await;
    assert_eq!(load_snapshot(&path).expect("readable").len(), 1);
}

#[tokio::test]
async fn test_in_memory_store_skips_file() {
    let store = SubmissionStore::in_memory();
    assert!(store.path().is_none());
    let (count, persisted) = store.append(UserEntry::new(valid_form())).await;
    assert_eq!(count, 1);
    assert!(persisted.is_skipped());
}

#[tokio::test]
async fn test_concurrent_appends_are_all_kept() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("submissions.json");
    let store = std::sync::Arc::new(SubmissionStore::open(&path));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.append(UserEntry::new(valid_form())).await
        }));
    }
    for handle in handles {
        handle.await.expect("task finished");
    }

    assert_eq!(store.len().await, 10);
    assert_eq!(load_snapshot(&path).expect("readable").len(), 10);
}
