//! Tests for the JSON file store.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;
use crate::domain::{ApplicationDetails, ApplicationInput, ApplicationPatch};

struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().join("data")).expect("utf-8 temp path");
    Workspace { _temp: temp, root }
}

fn application(id: &str, second: u32) -> JobApplication {
    let details = ApplicationDetails::try_from_input(ApplicationInput {
        company: Some("Initech".to_owned()),
        role: Some("Analyst".to_owned()),
        status: Some("applied".to_owned()),
        notes: Some("first round".to_owned()),
        ..ApplicationInput::default()
    })
    .expect("valid details");
    let at = Utc
        .with_ymd_and_hms(2026, 4, 1, 10, 0, second)
        .single()
        .expect("valid timestamp");
    JobApplication::create(ApplicationId::new(id).expect("id"), details, at)
}

#[rstest]
#[tokio::test]
async fn missing_document_is_an_empty_store(workspace: Workspace) {
    let store = JsonFileApplicationRepository::open(&workspace.root).expect("open");
    assert!(store.list().await.expect("list").is_empty());
    assert!(!store.path().exists());
}

#[rstest]
#[tokio::test]
async fn records_survive_reopening(workspace: Workspace) {
    let store = JsonFileApplicationRepository::open(&workspace.root).expect("open");
    store.insert(&application("a", 1)).await.expect("insert a");
    store.insert(&application("b", 2)).await.expect("insert b");

    let reopened = JsonFileApplicationRepository::open(&workspace.root).expect("reopen");
    let ids: Vec<String> = reopened
        .list()
        .await
        .expect("list")
        .iter()
        .map(|app| app.id().to_string())
        .collect();
    assert_eq!(ids, ["b", "a"]);
}

#[rstest]
#[tokio::test]
async fn update_persists_cleared_fields(workspace: Workspace) {
    let store = JsonFileApplicationRepository::open(&workspace.root).expect("open");
    let original = application("a", 1);
    store.insert(&original).await.expect("insert");

    let patch = ApplicationPatch::try_from_input(ApplicationInput {
        notes: Some(String::new()),
        ..ApplicationInput::default()
    })
    .expect("patch");
    let changed = original.with_changes(&patch, Utc::now());
    assert!(store.update(&changed).await.expect("update"));

    let found = store
        .find_by_id(original.id())
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found.details().notes(), None);

    let raw = std::fs::read_to_string(store.path()).expect("read document");
    assert!(raw.contains("\"notes\": null"));
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_record_leaves_document_alone(workspace: Workspace) {
    let store = JsonFileApplicationRepository::open(&workspace.root).expect("open");
    let missing = ApplicationId::new("ghost").expect("id");

    assert!(!store.delete(&missing).await.expect("delete"));
    assert!(!store.path().exists());
}

#[rstest]
#[tokio::test]
async fn corrupt_document_is_a_query_error(workspace: Workspace) {
    let store = JsonFileApplicationRepository::open(&workspace.root).expect("open");
    std::fs::write(store.path(), "{ not json").expect("write corrupt file");

    let err = store.list().await.expect_err("corrupt");
    assert!(matches!(err, ApplicationRepositoryError::Query { .. }));
}

#[rstest]
#[tokio::test]
async fn cancelled_write_keeps_lock_until_rewrite_finishes(workspace: Workspace) {
    let store = JsonFileApplicationRepository::open(&workspace.root).expect("open");
    let slow = application("slow", 1);

    let cancelled = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        store.modify(move |applications| {
            std::thread::sleep(std::time::Duration::from_millis(300));
            applications.push(slow);
            Ok(((), true))
        }),
    )
    .await;
    assert!(cancelled.is_err(), "slow write should outlive the timeout");

    store
        .insert(&application("fast", 2))
        .await
        .expect("insert after cancelled write");

    let ids: Vec<String> = store
        .list()
        .await
        .expect("list")
        .iter()
        .map(|app| app.id().to_string())
        .collect();
    assert_eq!(ids, ["fast", "slow"]);
}
