use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LEGACY_STORE: &str = r#"{
  "sections": [{"id": 1, "name": "News"}],
  "posts": [
    {
      "id": "p1",
      "title": "Double encoded",
      "blocks": "[{\"id\":1,\"type\":\"heading\",\"level\":2,\"content\":\"Hello\"},{\"id\":2,\"type\":\"paragraph\",\"content\":\"World\"}]",
      "content": "[{\"id\":1,\"type\":\"heading\",\"level\":2,\"content\":\"Hello\"}]"
    },
    {
      "id": "p2",
      "title": "Pre-block",
      "blocks": null,
      "content": "[{\"id\":\"g\",\"type\":\"grid\",\"children\":[{\"id\":\"a\",\"type\":\"paragraph\",\"content\":\"A\"},{\"id\":\"b\",\"type\":\"paragraph\",\"content\":\"B\"}]}]"
    }
  ]
}"#;

fn store_with(dir: &Path, content: &str) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data/db.json"), content).unwrap();
}

fn read_store(dir: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join("data/db.json")).unwrap()).unwrap()
}

#[test]
fn test_init_creates_config_and_store() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(dir.path().join("folio.config.json").exists());
    assert_eq!(read_store(dir.path())["posts"], Value::Array(vec![]));

    // Second run leaves the existing config alone
    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_migrate_rewrites_legacy_posts() {
    let dir = TempDir::new().unwrap();
    store_with(dir.path(), LEGACY_STORE);

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("p1").and(predicate::str::contains("p2")));

    let store = read_store(dir.path());
    let p1 = &store["posts"][0];
    assert!(p1["blocks"].is_array());
    assert_eq!(p1["content"], "Hello\nWorld");
    assert_eq!(store["posts"][1]["content"], "A\nB");
    assert_eq!(store["sections"][0]["name"], "News");
    assert!(dir.path().join("data/db.json.bak").exists());
}

#[test]
fn test_migrate_dry_run_does_not_write() {
    let dir = TempDir::new().unwrap();
    store_with(dir.path(), LEGACY_STORE);

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .args(["migrate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    assert!(read_store(dir.path())["posts"][0]["blocks"].is_string());
}

#[test]
fn test_extract_prints_plain_text() {
    let dir = TempDir::new().unwrap();
    store_with(dir.path(), LEGACY_STORE);

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .args(["extract", "p2"])
        .assert()
        .success()
        .stdout("A\nB\n");
}

#[test]
fn test_extract_unknown_post_fails() {
    let dir = TempDir::new().unwrap();
    store_with(dir.path(), LEGACY_STORE);

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .args(["extract", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Post not found: missing"));
}

#[test]
fn test_check_reports_and_fixes_violations() {
    let dir = TempDir::new().unwrap();
    store_with(
        dir.path(),
        r#"{"posts":[{"id":"p","content":"","blocks":[
            {"id":"c","type":"columns","columnCount":3,"children":[[],[]]},
            {"id":"h","type":"heading","level":9,"content":"Big"}
        ]}]}"#,
    );

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invariant violations"));

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .args(["check", "--fix"])
        .assert()
        .success();

    let store = read_store(dir.path());
    let blocks = &store["posts"][0]["blocks"];
    assert_eq!(blocks[0]["children"].as_array().unwrap().len(), 3);
    assert_eq!(blocks[1]["level"], 6);
    assert_eq!(store["posts"][0]["content"], "Big");
}

#[test]
fn test_new_block_uses_configured_prefix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("folio.config.json"), r#"{"idPrefix":"post"}"#).unwrap();

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .args(["new-block", "columns", "--compact"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""type":"columns""#)
                .and(predicate::str::contains(r#""id":"post-"#))
                .and(predicate::str::contains(r#""children":[[],[]]"#)),
        );
}

#[test]
fn test_new_block_rejects_unknown_type() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("folio")
        .current_dir(dir.path())
        .args(["new-block", "table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("table"));
}
