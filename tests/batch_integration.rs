//! Integration tests for batch conversion.

use std::path::Path;

use session_render::batch_cmd;

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

const MESSAGE: &str =
    r#"{"type":"message","role":"user","content":[{"type":"input_text","text":"hello"}]}"#;

#[test]
fn test_batch_mirrors_tree_and_builds_index() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("sessions");
    write(&root.join("a/x.jsonl"), MESSAGE);
    write(&root.join("b/y.jsonl"), MESSAGE);
    let out = temp.path().join("out");

    let summary = batch_cmd::run(&root, &out, None).expect("batch should succeed");

    assert_eq!(summary.converted(), 2);
    assert!(summary.failed.is_empty());
    assert!(out.join("a/x.html").is_file());
    assert!(out.join("b/y.html").is_file());

    let index = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("href=\"a/x.html\""));
    assert!(index.contains("href=\"b/y.html\""));

    let page = std::fs::read_to_string(out.join("a/x.html")).unwrap();
    assert!(page.contains("hello"));
}

#[test]
fn test_index_json_matches_converted_files() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("sessions");
    write(&root.join("one.jsonl"), MESSAGE);
    write(&root.join("broken.jsonl"), "{{{\n");
    write(&root.join("ignored.txt"), MESSAGE);
    let out = temp.path().join("out");

    let summary = batch_cmd::run(&root, &out, None).unwrap();
    assert_eq!(summary.converted(), 1);
    assert_eq!(summary.failed.len(), 1);

    let json = std::fs::read_to_string(out.join("index.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["href"], "one.html");
    assert_eq!(entries[0]["source"], "one.jsonl");
    assert!(!out.join("ignored.html").exists());
}

#[test]
fn test_empty_root_still_writes_index() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("sessions");
    std::fs::create_dir_all(&root).unwrap();
    let out = temp.path().join("out");

    let summary = batch_cmd::run(&root, &out, None).unwrap();
    assert_eq!(summary.converted(), 0);
    assert!(out.join("index.html").is_file());
}

#[test]
fn test_missing_root_fails() {
    let temp = tempfile::tempdir().unwrap();
    let result = batch_cmd::run(&temp.path().join("absent"), &temp.path().join("out"), None);
    assert!(result.is_err());
    assert!(!temp.path().join("out/index.html").exists());
}
