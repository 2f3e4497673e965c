//! Git operations
//!
//! Change detection reads the committed lock file straight from `HEAD` with
//! the gix crate. Publishing the update (branch, commit, push) shells out
//! to the `git` CLI, which owns credential and transport handling.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// `git` executable not available
    #[error("git not found in PATH")]
    GitNotFound,

    /// Not a git repository
    #[error("Invalid repository at '{path}': {error}")]
    InvalidRepository { path: PathBuf, error: String },

    /// Failed to read the committed file from HEAD
    #[error("Failed to read '{file}' at HEAD: {error}")]
    ReadHead { file: String, error: String },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// A git command exited unsuccessfully
    #[error("'{command}' failed: {error}")]
    CommandFailed { command: String, error: String },
}

/// Everything needed to publish the update branch
#[derive(Debug, Clone)]
pub struct BranchPublish<'a> {
    /// Remote to create or repoint
    pub remote_name: &'a str,
    /// Push URL for the remote (may embed a token)
    pub push_url: &'a str,
    /// New branch name
    pub branch: &'a str,
    pub user_name: &'a str,
    pub user_email: &'a str,
    /// Work-tree relative path to commit
    pub path: &'a str,
    pub message: &'a str,
}

/// A git work tree
#[derive(Debug)]
pub struct GitRepository {
    /// Working directory for git operations
    work_dir: PathBuf,
    /// Strings scrubbed from command lines and git output
    redacted: Vec<String>,
}

impl GitRepository {
    /// Create a handler for the work tree at `work_dir`
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            redacted: Vec::new(),
        }
    }

    /// Scrub `secret` from any error this handler reports
    #[must_use]
    pub fn with_redacted(mut self, secret: &str) -> Self {
        if !secret.is_empty() {
            self.redacted.push(secret.to_string());
        }
        self
    }

    /// Whether a work-tree file differs from its committed version
    ///
    /// A file missing from `HEAD` counts as changed if it exists on disk.
    pub fn file_changed(&self, relative: &str) -> Result<bool, GitError> {
        let repo = gix::open(&self.work_dir).map_err(|e| GitError::InvalidRepository {
            path: self.work_dir.clone(),
            error: e.to_string(),
        })?;

        let committed = committed_contents(&repo, relative)?;

        let on_disk_path = self.work_dir.join(relative);
        let on_disk = match std::fs::read(&on_disk_path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(GitError::IoError {
                    path: on_disk_path,
                    error: e.to_string(),
                })
            }
        };

        let changed = committed != on_disk;
        tracing::debug!("{relative} changed since HEAD: {changed}");
        Ok(changed)
    }

    /// Create the update branch, commit the file and push it
    pub fn publish_branch(&self, publish: &BranchPublish<'_>) -> Result<(), GitError> {
        self.set_remote(publish.remote_name, publish.push_url)?;
        self.run(&["checkout", "-b", publish.branch])?;
        self.run(&["config", "user.name", publish.user_name])?;
        self.run(&["config", "user.email", publish.user_email])?;
        self.run(&["add", "--", publish.path])?;
        self.run(&["commit", "-m", publish.message])?;
        self.run(&["push", "-q", publish.remote_name, publish.branch])?;
        tracing::info!("Pushed branch {} to {}", publish.branch, publish.remote_name);
        Ok(())
    }

    /// Point `name` at `url`, adding the remote if it does not exist
    fn set_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        let remotes = self.run(&["remote"])?;
        if remotes.lines().any(|line| line.trim() == name) {
            self.run(&["remote", "set-url", name, url])?;
        } else {
            self.run(&["remote", "add", name, url])?;
        }
        Ok(())
    }

    /// Run a git command in the work tree and return its stdout
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = self.redact(&format!("git {}", args.join(" ")));
        tracing::debug!("{command}");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::GitNotFound
                } else {
                    GitError::CommandFailed {
                        command: command.clone(),
                        error: e.to_string(),
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                command,
                error: self.redact(stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn redact(&self, text: &str) -> String {
        self.redacted
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), "***"))
    }
}

/// Contents of `relative` in the `HEAD` tree, if tracked
fn committed_contents(repo: &gix::Repository, relative: &str) -> Result<Option<Vec<u8>>, GitError> {
    let read_error = |error: String| GitError::ReadHead {
        file: relative.to_string(),
        error,
    };

    let commit = repo.head_commit().map_err(|e| read_error(e.to_string()))?;
    let tree = commit.tree().map_err(|e| read_error(e.to_string()))?;
    let Some(entry) = tree
        .lookup_entry_by_path(relative)
        .map_err(|e| read_error(e.to_string()))?
    else {
        return Ok(None);
    };

    let object = entry.object().map_err(|e| read_error(e.to_string()))?;
    Ok(Some(object.detach().data))
}
