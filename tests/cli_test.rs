use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_chart(root: &Path, id: &str, content: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("song.tmb"), content).unwrap();
}

fn chartz(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chartz").unwrap();
    cmd.arg("--dir").arg(dir.path());
    cmd
}

#[test]
fn list_shows_charts_and_load_warnings() {
    let dir = TempDir::new().unwrap();
    write_chart(dir.path(), "waltz", r#"{"name": "Blue Danube", "author": "Strauss"}"#);
    fs::create_dir_all(dir.path().join("empty-dir")).unwrap();

    chartz(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Blue Danube"))
        .stdout(predicate::str::contains("empty-dir"))
        .stdout(predicate::str::contains("no song.tmb file"));
}

#[test]
fn list_sorts_by_a_column() {
    let dir = TempDir::new().unwrap();
    write_chart(dir.path(), "a", r#"{"name": "Zebra"}"#);
    write_chart(dir.path(), "b", r#"{"name": "Aardvark"}"#);

    let output = chartz(&dir)
        .args(["list", "--sort", "name"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let zebra = stdout.find("Zebra").unwrap();
    let aardvark = stdout.find("Aardvark").unwrap();
    assert!(aardvark < zebra);

    let output = chartz(&dir)
        .args(["list", "--sort", "name", "--desc"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let zebra = stdout.find("Zebra").unwrap();
    let aardvark = stdout.find("Aardvark").unwrap();
    assert!(zebra < aardvark);
}

#[test]
fn set_persists_edits_to_the_file() {
    let dir = TempDir::new().unwrap();
    write_chart(
        dir.path(),
        "waltz",
        r#"{"name": "Old", "notes": [[1, 2, 3]]}"#,
    );

    chartz(&dir)
        .args(["set", "waltz", "name=New Name", "difficulty=7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 chart(s)"));

    let content = fs::read_to_string(dir.path().join("waltz").join("song.tmb")).unwrap();
    let doc: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["name"], json!("New Name"));
    assert_eq!(doc["difficulty"], json!(7));
    assert_eq!(doc["notes"], json!([[1, 2, 3]]));
}

#[test]
fn invalid_values_fail_before_anything_is_written() {
    let dir = TempDir::new().unwrap();
    write_chart(dir.path(), "waltz", r#"{"name": "Old"}"#);

    chartz(&dir)
        .args(["set", "waltz", "difficulty=11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 10"));

    // Nothing was flushed.
    let content = fs::read_to_string(dir.path().join("waltz").join("song.tmb")).unwrap();
    let doc: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["name"], json!("Old"));
    assert!(doc.get("difficulty").is_none());
}

#[test]
fn unset_removes_the_field() {
    let dir = TempDir::new().unwrap();
    write_chart(dir.path(), "waltz", r#"{"name": "Waltz", "UNK1": 9}"#);

    chartz(&dir)
        .args(["unset", "waltz", "UNK1"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("waltz").join("song.tmb")).unwrap();
    let doc: Value = serde_json::from_str(&content).unwrap();
    assert!(doc.get("UNK1").is_none());
    assert_eq!(doc["name"], json!("Waltz"));
}

#[test]
fn show_prints_every_declared_field() {
    let dir = TempDir::new().unwrap();
    write_chart(
        dir.path(),
        "waltz",
        r#"{"name": "Blue Danube", "tempo": 174, "note_color_start": [0.2, 0.4, 0.8]}"#,
    );

    chartz(&dir)
        .args(["show", "waltz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blue Danube"))
        .stdout(predicate::str::contains("174"))
        .stdout(predicate::str::contains("0.2 0.4 0.8"));
}

#[test]
fn check_reports_broken_directories() {
    let dir = TempDir::new().unwrap();
    write_chart(dir.path(), "good", r#"{"name": "Good"}"#);
    write_chart(dir.path(), "bad", "{ nope");

    chartz(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 chart(s) loaded"))
        .stdout(predicate::str::contains("bad: invalid JSON"));
}

#[test]
fn missing_charts_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("chartz").unwrap();
    cmd.arg("--dir")
        .arg(dir.path().join("nope"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read charts directory"));
}

#[test]
fn export_writes_an_archive() {
    let dir = TempDir::new().unwrap();
    write_chart(dir.path(), "waltz", r#"{"name": "Waltz"}"#);
    let work = TempDir::new().unwrap();

    chartz(&dir)
        .current_dir(work.path())
        .args(["export", "waltz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 chart(s)"));

    let archives: Vec<_> = fs::read_dir(work.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tar.gz"))
        .collect();
    assert_eq!(archives.len(), 1);
}
