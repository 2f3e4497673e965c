//! Lock update workflow
//!
//! Sequences one update run: snapshot the lock file, run the resolver, and
//! if the lock moved, publish a branch and open a pull request whose body
//! is the rendered change summary.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::defaults;
use crate::core::config::UpdateSettings;
use crate::core::diff::{diff_snapshots, SnapshotDiff};
use crate::core::lock::LockSnapshot;
use crate::core::summary::render_summary;
use crate::error::{ConfigError, LockError, RenderError};
use crate::infra::git::{BranchPublish, GitError, GitRepository};
use crate::infra::github::{GitHubClient, GitHubError, NewPullRequest};
use crate::infra::resolver::{ResolverCommand, ResolverError};

/// Errors that can occur during an update run
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Lock file could not be read
    #[error("Failed to read '{path}': {error}")]
    Io { path: PathBuf, error: String },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Pull request fields, before anything is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub title: String,
    /// `owner:branch`
    pub head: String,
    pub base: String,
    pub body: String,
}

impl From<PullRequestDraft> for NewPullRequest {
    fn from(draft: PullRequestDraft) -> Self {
        Self {
            title: draft.title,
            head: draft.head,
            base: draft.base,
            body: draft.body,
        }
    }
}

/// How an update run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The resolver left the lock file as committed
    UpToDate,
    /// Changes found, but nothing was pushed
    DryRun {
        branch: String,
        draft: PullRequestDraft,
    },
    /// Branch pushed and pull request opened
    PullRequestOpened {
        number: u64,
        url: String,
        branch: String,
    },
}

/// Update branch name for a run started at `now`
pub fn branch_name(now: &DateTime<Local>) -> String {
    format!("{}{}", defaults::BRANCH_PREFIX, now.format("%Y-%m-%d-%H%M%S"))
}

/// Pull request title for a run started at `now`
pub fn pull_request_title(now: &DateTime<Local>) -> String {
    format!("Dep update at {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// Build the pull request for a diff
pub fn draft_pull_request(
    settings: &UpdateSettings,
    branch: &str,
    now: &DateTime<Local>,
    diff: &SnapshotDiff,
) -> Result<PullRequestDraft, RenderError> {
    Ok(PullRequestDraft {
        title: pull_request_title(now),
        head: format!("{}:{branch}", settings.repository.owner),
        base: settings.base_branch.clone(),
        body: render_summary(diff)?,
    })
}

/// Run the whole update workflow
pub async fn run_update(settings: &UpdateSettings) -> Result<UpdateOutcome, UpdateError> {
    let lock_path = settings.lock_path();
    let before = read_snapshot(&lock_path)?;
    tracing::debug!(
        "{} locks {} projects before update",
        settings.lock_file,
        before.projects.len()
    );

    ResolverCommand::from_argv(&settings.resolver)?.run(&settings.project_dir)?;

    let git = GitRepository::new(settings.project_dir.clone()).with_redacted(settings.token.expose());
    if !git.file_changed(&settings.lock_file)? {
        tracing::info!("{} is up to date", settings.lock_file);
        return Ok(UpdateOutcome::UpToDate);
    }

    let after = read_snapshot(&lock_path)?;
    let diff = diff_snapshots(&before, &after);
    log_membership_changes(&diff);

    let now = Local::now();
    let branch = branch_name(&now);
    let draft = draft_pull_request(settings, &branch, &now, &diff)?;

    if settings.dry_run {
        tracing::info!("Dry run: not pushing {branch}");
        return Ok(UpdateOutcome::DryRun { branch, draft });
    }

    let push_url = settings.push_url();
    git.publish_branch(&BranchPublish {
        remote_name: &settings.remote_name,
        push_url: &push_url,
        branch: &branch,
        user_name: &settings.user,
        user_email: &settings.email,
        path: &settings.lock_file,
        message: &settings.commit_message,
    })?;

    let client = GitHubClient::new(settings.token.clone());
    let pr = client
        .create_pull_request(
            &settings.repository.owner,
            &settings.repository.name,
            &draft.into(),
        )
        .await?;
    tracing::info!("Opened pull request #{}: {}", pr.number, pr.html_url);

    Ok(UpdateOutcome::PullRequestOpened {
        number: pr.number,
        url: pr.html_url,
        branch,
    })
}

/// Read and parse a lock file
pub fn read_snapshot(path: &Path) -> Result<LockSnapshot, UpdateError> {
    let content = fs::read_to_string(path).map_err(|e| UpdateError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(LockSnapshot::from_toml(&content)?)
}

fn log_membership_changes(diff: &SnapshotDiff) {
    for project in &diff.added {
        tracing::info!("Added {} at {}", project.name, project.identity);
    }
    for project in &diff.removed {
        tracing::info!("Removed {}", project.name);
    }
    tracing::info!(
        "{} modified, {} added, {} removed",
        diff.modified.len(),
        diff.added.len(),
        diff.removed.len()
    );
}
