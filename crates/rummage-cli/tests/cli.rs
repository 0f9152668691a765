//! End-to-end tests for the `rummage` binary.

use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

fn rummage() -> Command {
    let mut cmd = Command::cargo_bin("rummage").expect("rummage binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_detect_plain_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.bin");
    fs::write(&path, "hello there").unwrap();

    let output = rummage().current_dir(dir.path()).arg("detect").arg(&path).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("mime_type: text/plain; charset=utf-8"));
    assert!(stdout.contains("extension: unknown"));
    assert!(stdout.contains("strategy: raw"));
}

#[test]
fn test_extract_text_escapes_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.txt");
    fs::write(&path, "line one\nline two").unwrap();

    let output = rummage().current_dir(dir.path()).args(["extract"]).arg(&path).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "\"line one\\nline two\"\n");
}

#[test]
fn test_extract_json_with_urls() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("links.txt");
    fs::write(&path, "a https://example.com/a b https://example.com/a").unwrap();

    let output = rummage()
        .current_dir(dir.path())
        .arg("extract")
        .arg(&path)
        .args(["--format", "json", "--urls"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "links.txt");
    assert_eq!(json["strategy"], "raw");
    assert_eq!(json["strings"].as_array().unwrap().len(), 1);
    assert_eq!(json["urls"], serde_json::json!(["https://example.com/a"]));
}

#[test]
fn test_urls_command() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<html><a href=\"http://one.example.org/\">1</a> ftp://files.example.net/x</html>").unwrap();

    let output = rummage().current_dir(dir.path()).arg("urls").arg(&path).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "http://one.example.org/\nftp://files.example.net/x\n"
    );
}

#[test]
fn test_missing_file_fails() {
    let dir = tempdir().unwrap();
    let output = rummage()
        .current_dir(dir.path())
        .args(["extract", "does-not-exist.bin"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("rummage.toml"), "[detection]\nsniff_window = 0\n").unwrap();
    let path = dir.path().join("x.txt");
    fs::write(&path, "x").unwrap();

    let output = rummage().current_dir(dir.path()).arg("detect").arg(&path).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_explicit_config_flag() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.json");
    fs::write(&config, r#"{"pdf": {"max_object_probes": 10}}"#).unwrap();
    let path = dir.path().join("x.txt");
    fs::write(&path, "x").unwrap();

    rummage()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("detect")
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_creds_to_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("creds.txt");
    let output = dir.path().join("creds.csv");
    fs::write(&input, "[\"alice\",\"secret\"]\nnot a pair\n[\"bob\",\"hunter2\"]\n").unwrap();

    rummage()
        .current_dir(dir.path())
        .arg("creds-to-csv")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("username,password\n"));
    assert!(csv.contains("alice,secret\n"));
    assert!(csv.contains("bob,hunter2\n"));
    assert!(!csv.contains("not a pair"));
}

#[test]
fn test_flatten_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let out_dir = dir.path().join("out");
    fs::write(&input, r#"[{"a": {"b": 1}, "c": "x\ny"}]"#).unwrap();

    let output = rummage()
        .current_dir(dir.path())
        .arg("flatten-json")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(output.status.success());

    let written = String::from_utf8(output.stdout).unwrap();
    let content = fs::read_to_string(written.trim()).unwrap();
    let record: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record["a_b"], "1");
    assert_eq!(record["c"], "x y");
}

#[test]
fn test_time_windows() {
    let output = rummage()
        .args(["time-windows", "--back", "2", "--increment", "30"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.lines().all(|line| line.contains(" -> ")));
}
