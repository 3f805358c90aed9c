//! End-to-end CLI tests for qqtable.
//!
//! These tests run the actual binary inside a temporary working directory
//! holding an export and (optionally) a `config.txt`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const SEP: &str = "================================================================";

fn export() -> String {
    format!(
        "消息记录（此消息记录为文本格式，不支持重新导入）\n\n\
         {SEP}\n消息分组:我的好友\n{SEP}\n消息对象:Alice\n{SEP}\n\n\
         2023-01-05 9:30:00 Alice\nhello\nworld\n\n\
         2023-01-05 9:31:00 我\n\n\
         {SEP}\n消息分组:最近联系人\n{SEP}\n消息对象:Bob\n{SEP}\n\n\
         2023-01-06 21:00:00 Bob\nhi\n\n"
    )
}

/// Creates a working directory with the export under its default name.
fn setup() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("全部消息记录.txt"), export()).unwrap();
    dir
}

fn qqtable_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_qqtable")));
    cmd.current_dir(dir.path()).arg("--no-open").arg("--no-pause");
    cmd
}

fn read_table(path: &Path) -> String {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    String::from_utf8(bytes[3..].to_vec()).unwrap()
}

// ============================================================================
// Basic runs
// ============================================================================

#[test]
fn test_defaults_without_config_file() {
    let dir = setup();
    qqtable_cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    let out = dir.path().join("output");
    let table = read_table(&out.join("我的好友-Alice.csv"));
    assert!(table.starts_with("时间,发送者,内容"));
    assert!(table.contains("\"hello\nworld\""));
    assert!(!out.join("最近联系人-Bob.csv").exists());
}

#[test]
fn test_config_file_is_honoured() {
    let dir = setup();
    fs::write(
        dir.path().join("config.txt"),
        "OutputDir=tables\nOutputFileName={Name}.csv\nIgnoreRecent=false\nMultiLines=false\n",
    )
    .unwrap();

    qqtable_cmd(&dir).assert().success();

    let out = dir.path().join("tables");
    assert!(out.join("Bob.csv").exists());
    let table = read_table(&out.join("Alice.csv"));
    assert!(table.contains("helloworld"));
}

#[test]
fn test_cli_overrides_config() {
    let dir = setup();
    fs::write(dir.path().join("config.txt"), "OutputDir=from_config\n").unwrap();

    qqtable_cmd(&dir)
        .args(["-o", "from_cli", "--keep-recent", "--ignore-empty"])
        .assert()
        .success();

    assert!(!dir.path().join("from_config").exists());
    let out = dir.path().join("from_cli");
    assert!(out.join("最近联系人-Bob.csv").exists());
    let table = read_table(&out.join("我的好友-Alice.csv"));
    assert_eq!(table.lines().filter(|l| l.starts_with("2023-")).count(), 1);
}

#[test]
fn test_explicit_input_and_config_paths() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("chat.txt"), export()).unwrap();
    fs::write(dir.path().join("my.cfg"), "OutputDir=custom\n").unwrap();

    qqtable_cmd(&dir)
        .args(["chat.txt", "-c", "my.cfg"])
        .assert()
        .success();

    assert!(dir.path().join("custom").join("我的好友-Alice.csv").exists());
}

#[test]
fn test_output_dir_wiped_between_runs() {
    let dir = setup();
    let out = dir.path().join("output");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("stale.csv"), "old").unwrap();

    qqtable_cmd(&dir).assert().success();
    assert!(!out.join("stale.csv").exists());
}

#[test]
fn test_malformed_label_is_not_fatal() {
    let dir = tempdir().unwrap();
    let content = format!(
        "preamble\n\n{SEP}\nbroken\n{SEP}\n消息对象:Alice\n{SEP}\n2023-01-05 9:30:00 Alice\nhi\n"
    );
    fs::write(dir.path().join("全部消息记录.txt"), content).unwrap();

    qqtable_cmd(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed label line"));
    assert!(dir.path().join("output").join("-Alice.csv").exists());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_input_fails() {
    let dir = tempdir().unwrap();
    qqtable_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_invalid_bool_fails() {
    let dir = setup();
    fs::write(dir.path().join("config.txt"), "IgnoreEmpty=yes\n").unwrap();
    qqtable_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("IgnoreEmpty"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_invalid_timestamp_fails() {
    let dir = tempdir().unwrap();
    let content = format!(
        "preamble\n\n{SEP}\n消息分组:G\n{SEP}\n消息对象:N\n{SEP}\n2023-13-01 9:30:00 A\nx\n"
    );
    fs::write(dir.path().join("全部消息记录.txt"), content).unwrap();

    qqtable_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help() {
    let dir = tempdir().unwrap();
    qqtable_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore-empty"))
        .stdout(predicate::str::contains("--single-line"));
}

#[test]
fn test_version() {
    let dir = tempdir().unwrap();
    qqtable_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
