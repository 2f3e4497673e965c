//! Integration tests for `ci-dep-update diff`

mod common;

use common::{run_cli, stderr, stdout, testdata, TestProject, CHANGED_SUMMARY};

#[test]
fn test_diff_prints_summary() {
    let project = TestProject::new();
    let before = testdata("changed/before/Gopkg.lock");
    let after = testdata("changed/after/Gopkg.lock");

    let output = run_cli(
        &project.path(),
        &["diff", before.to_str().unwrap(), after.to_str().unwrap()],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), CHANGED_SUMMARY);
}

#[test]
fn test_diff_json() {
    let project = TestProject::new();
    let before = testdata("changed/before/Gopkg.lock");
    let after = testdata("changed/after/Gopkg.lock");

    let output = run_cli(
        &project.path(),
        &["diff", before.to_str().unwrap(), after.to_str().unwrap(), "--json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["modified"].as_array().unwrap().len(), 3);
    assert_eq!(json["added"][0]["name"], "gopkg.in/yaml.v2");
    assert_eq!(json["modified"][0]["current"]["kind"], "version_pair");
    assert_eq!(json["modified"][0]["current"]["version"], "v1.6.0");
    assert!(json["removed"].as_array().unwrap().is_empty());
}

#[test]
fn test_diff_rejects_conflicting_identity() {
    let project = TestProject::new();
    project.create_file(
        "bad.lock",
        r#"
[[projects]]
  branch = "foo"
  name = "github.com/acme/foo"
  packages = ["."]
  revision = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678"
  version = "1.0"
"#,
    );
    let good = testdata("changed/before/Gopkg.lock");

    let output = run_cli(
        &project.path(),
        &["diff", "bad.lock", good.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains(
            "lock file specified both a branch (foo) and version (1.0) for github.com/acme/foo"
        ),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_diff_missing_file() {
    let project = TestProject::new();
    let output = run_cli(&project.path(), &["diff", "nope.lock", "nope2.lock"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope.lock"));
}
