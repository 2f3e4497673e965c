//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Fixture directory for the "changed" scenario
pub fn testdata(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(path)
}

/// Run the ci-dep-update binary in `dir`
///
/// Environment variables the `run` flags read are cleared so the host
/// environment cannot leak into a test.
pub fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ci-dep-update"))
        .current_dir(dir)
        .env_remove("GITHUB_ACCESS_TOKEN")
        .env_remove("GIT_USER_NAME")
        .env_remove("GIT_USER_EMAIL")
        .env_remove("REPOSITORY_URL")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute ci-dep-update")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A git work tree with the "before" fixture committed as Gopkg.lock
    /// and the "after" fixture saved as `next.lock`
    pub fn with_committed_lock() -> Self {
        let project = Self::new();
        project.git(&["init", "-q"]);
        project.copy_fixture("changed/before/Gopkg.lock", "Gopkg.lock");
        project.copy_fixture("changed/after/Gopkg.lock", "next.lock");
        project.git(&["add", "Gopkg.lock"]);
        project.git(&["commit", "-q", "-m", "initial"]);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Copy a fixture from tests/testdata into the project
    pub fn copy_fixture(&self, fixture: &str, name: &str) {
        std::fs::copy(testdata(fixture), self.dir.path().join(name))
            .expect("Failed to copy fixture");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Run git in the project with a fixed identity
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the tools the workflow tests shell out to are present
pub fn workflow_tools_available() -> bool {
    cfg!(unix) && which::which("git").is_ok()
}

/// Summary the "changed" fixtures must render to
pub const CHANGED_SUMMARY: &str = "**Changed:**

* [github.com/mattn/go-sqlite3](https://github.com/mattn/go-sqlite3) [v1.4.0...v1.6.0](https://github.com/mattn/go-sqlite3/compare/v1.4.0...v1.6.0)
* [github.com/olekukonko/tablewriter](https://github.com/olekukonko/tablewriter) [65fec0d...96aac99](https://github.com/olekukonko/tablewriter/compare/65fec0d...96aac99)
* [github.com/y-yagi/goext](https://github.com/y-yagi/goext) [0c56270...fd0b1e8](https://github.com/y-yagi/goext/compare/0c56270...fd0b1e8)
";

/// Minimal valid lock file
pub const SAMPLE_LOCK: &str = r#"
[[projects]]
  name = "github.com/acme/foo"
  packages = ["."]
  revision = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678"

[solve-meta]
  analyzer-name = "dep"
  analyzer-version = 1
  inputs-digest = "ab12"
  solver-name = "gps-cdcl"
  solver-version = 1
"#;
