//! Integration tests for `ci-dep-update check`

mod common;

use common::{run_cli, stderr, stdout, TestProject, SAMPLE_LOCK};

#[test]
fn test_check_valid_lock() {
    let project = TestProject::new();
    project.create_file("Gopkg.lock", SAMPLE_LOCK);

    let output = run_cli(&project.path(), &["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Gopkg.lock is valid"));
    assert!(out.contains("Projects:      1"));
    assert!(out.contains("Inputs digest: ab12"));
}

#[test]
fn test_check_explicit_path() {
    let project = TestProject::new();
    project.create_file("locks/other.lock", SAMPLE_LOCK);

    let output = run_cli(&project.path(), &["check", "locks/other.lock"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_check_invalid_digest() {
    let project = TestProject::new();
    project.create_file(
        "Gopkg.lock",
        "[solve-meta]\n  inputs-digest = \"not-hex\"\n",
    );

    let output = run_cli(&project.path(), &["check"]);

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("invalid hash digest in lock's memo field: 'not-hex'"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_check_missing_identity() {
    let project = TestProject::new();
    project.create_file(
        "Gopkg.lock",
        "[[projects]]\n  name = \"github.com/acme/foo\"\n  packages = []\n",
    );

    let output = run_cli(&project.path(), &["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output)
        .contains("lock file has entry for github.com/acme/foo, but specifies no branch or version"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let project = TestProject::new();
    let output = run_cli(&project.path(), &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}
