//! Integration tests for the machconf binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_runs_pipeline_from_file() {
    let (temp_dir, config_path) = common::create_test_config(
        r#"
steps:
  - command: echo
    args: "'hello from machconf'"
  - command: file
    path: written.txt
    content: ok
"#,
    );

    Command::cargo_bin("machconf")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("--file")
        .arg(&config_path)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello from machconf"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("written.txt")).unwrap(),
        "ok\n"
    );
}

#[test]
fn test_discovers_config_and_lists_steps() {
    let (temp_dir, _config_path) = common::create_test_config(
        r#"
name: listing
usage: Print greetings on the build host
steps:
  - command: echo
    name: shown
  - command: echo
    name: off
    disabled: true
"#,
    );

    Command::cargo_bin("machconf")
        .unwrap()
        .current_dir(temp_dir.path())
        .env("NO_COLOR", "1")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Print greetings on the build host"))
        .stdout(predicate::str::contains("shown"))
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let (temp_dir, config_path) = common::create_test_config(
        r#"
steps:
  - command: file
    path: out.txt
    content: data
"#,
    );

    Command::cargo_bin("machconf")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("-f")
        .arg(&config_path)
        .arg("--dry-run")
        .assert()
        .success();

    assert!(!temp_dir.path().join("out.txt").exists());
}

#[test]
fn test_var_override() {
    let (temp_dir, config_path) = common::create_test_config(
        r#"
vars:
  who: default
steps:
  - command: echo
    args: "'hello ${who}'"
"#,
    );

    Command::cargo_bin("machconf")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("-f")
        .arg(&config_path)
        .args(["--var", "who=override", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello override"));
}

#[test]
fn test_malformed_arguments_fail() {
    let (temp_dir, config_path) = common::create_test_config(
        r#"
steps:
  - command: echo
    args: "'never closed"
"#,
    );

    Command::cargo_bin("machconf")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("-f")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed arguments"));
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    Command::cargo_bin("machconf")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find config file"));
}
