//! Smoke tests for the guionista CLI
//!
//! These run the compiled binary against the YAML fixtures under
//! tests/fixtures/.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Get a command for the guionista binary
fn guionista() -> Command {
    Command::cargo_bin("guionista").expect("guionista binary should exist")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    guionista()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.1"));
}

#[test]
fn test_help_flag() {
    guionista()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scenario"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_no_args_shows_help() {
    // Requires a subcommand
    guionista().assert().failure();
}

#[test]
fn test_run_subcommand_help() {
    guionista()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--record"))
        .stdout(predicate::str::contains("--lenient-timeouts"));
}

// ============================================================================
// Check Command
// ============================================================================

#[test]
fn test_check_valid_scenario() {
    guionista()
        .arg("check")
        .arg(fixture("rename_page.yaml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("rename_page"))
        .stderr(predicate::str::contains("6 assertions"));
}

#[test]
fn test_check_verbose_lists_steps() {
    guionista()
        .args(["-v", "check"])
        .arg(fixture("rename_page.yaml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("click #loginButton"));
}

#[test]
fn test_check_missing_file_fails() {
    guionista()
        .args(["check", "/does/not/exist.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_check_stale_assertion_count_fails() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = std::fs::read_to_string(fixture("rename_page.yaml"))
        .unwrap()
        .replace("expected_assertions: 6", "expected_assertions: 2");
    let path = dir.path().join("stale.yaml");
    std::fs::write(&path, yaml).unwrap();

    guionista()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("declares 2 assertions"));
}

// ============================================================================
// Run Command
// ============================================================================

#[test]
fn test_run_rename_page_passes() {
    guionista()
        .arg("run")
        .arg(fixture("rename_page.yaml"))
        .arg("--page")
        .arg(fixture("admin_page.yaml"))
        .args(["--timeout", "2000"])
        .assert()
        .success()
        .stderr(predicate::str::contains("6 passed, 0 failed"));
}

#[test]
fn test_run_failing_page_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    // Renaming has no effect on this page.
    let yaml = std::fs::read_to_string(fixture("admin_page.yaml"))
        .unwrap()
        .replace("renamed-page", "untitled");
    let page = dir.path().join("broken.yaml");
    std::fs::write(&page, yaml).unwrap();

    guionista()
        .arg("run")
        .arg(fixture("rename_page.yaml"))
        .arg("--page")
        .arg(&page)
        .args(["--timeout", "2000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scenario failed"));
}

#[cfg(feature = "media")]
#[test]
fn test_run_with_record_writes_gif() {
    let dir = tempfile::tempdir().unwrap();
    guionista()
        .arg("run")
        .arg(fixture("rename_page.yaml"))
        .arg("--page")
        .arg(fixture("admin_page.yaml"))
        .args(["--timeout", "2000", "--record", "--output"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("recording written"));

    assert!(dir.path().join("rename_page.gif").exists());
    assert!(dir.path().join("rename_page.annotations.json").exists());
}
