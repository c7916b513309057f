//! File-backed store behaviour

use folio_store::{load_normalized, DocumentStore, JsonFileStore, StoreError};
use std::fs;
use tempfile::TempDir;

const LEGACY: &str = r#"{
  "sections": [{"id": 1, "name": "News"}],
  "posts": [
    {
      "id": "1",
      "title": "Double",
      "blocks": "[{\"id\":1,\"type\":\"paragraph\",\"content\":\"hi\"}]",
      "content": "[{\"id\":1,\"type\":\"paragraph\",\"content\":\"hi\"}]",
      "image": null,
      "date": "2020-01-01",
      "sectionId": 1
    },
    {
      "id": "2",
      "title": "Broken",
      "blocks": "[{oops",
      "content": "",
      "date": "2020-01-02",
      "sectionId": 1
    }
  ]
}"#;

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("db.json"));

    let collection = store.load_document().unwrap();
    assert!(collection.is_empty());
}

#[test]
fn test_migration_is_persisted_with_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, LEGACY).unwrap();
    let store = JsonFileStore::new(&path).with_backup(true);

    let loaded = load_normalized(&store).unwrap();

    assert!(loaded.persisted);
    assert_eq!(loaded.report.changed, vec!["1".to_string()]);
    assert_eq!(loaded.report.failures.len(), 1);
    assert_eq!(fs::read_to_string(store.backup_path()).unwrap(), LEGACY);

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(saved["posts"][0]["blocks"].is_array());
    assert_eq!(saved["posts"][0]["content"], "hi");
    assert_eq!(saved["posts"][1]["blocks"], "[{oops");
    assert_eq!(saved["sections"][0]["name"], "News");
}

#[test]
fn test_second_load_does_not_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, LEGACY).unwrap();
    let store = JsonFileStore::new(&path);

    load_normalized(&store).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    let second = load_normalized(&store).unwrap();
    assert!(!second.persisted);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/data/db.json"));

    store.save_document(&Default::default()).unwrap();

    assert!(store.path().exists());
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(&path).load_document().unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
}

#[test]
fn test_mistyped_post_does_not_block_others() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    fs::write(
        &path,
        r#"{"posts":[
            {"id":7,"content":"x"},
            {"id":"good","sectionId":"2","content":"[{\"id\":\"a\",\"type\":\"paragraph\",\"content\":\"ok\"}]"},
            {"id":"next","content":"[{\"id\":\"b\",\"type\":\"heading\",\"content\":\"fine\"}]"}
        ]}"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);

    let loaded = load_normalized(&store).unwrap();

    assert!(loaded.persisted);
    assert_eq!(loaded.report.changed, vec!["next".to_string()]);
    let failed: Vec<&str> = loaded.report.failures.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(failed, vec!["7", "good"]);

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["posts"][0], serde_json::json!({"id": 7, "content": "x"}));
    assert_eq!(saved["posts"][1]["sectionId"], "2");
    assert!(saved["posts"][1]["content"].is_string());
    assert_eq!(saved["posts"][2]["content"], "fine");
}
