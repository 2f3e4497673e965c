//! Change summary rendering
//!
//! Turns a [`SnapshotDiff`] into the Markdown body of the update pull
//! request. Only modified projects are listed; each line links the project
//! and, where the host supports it, a compare view between the two pins.

use crate::config::{defaults, urls};
use crate::core::diff::{ProjectDelta, SnapshotDiff};
use crate::core::lock::ProjectIdentity;
use crate::error::RenderError;

/// First line of every summary
pub const SUMMARY_HEADER: &str = "**Changed:**";

/// Where a project's links point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectHost {
    /// Hosted on GitHub under its own import path
    GitHub { url: String },
    /// `golang.org/x/*`, mirrored on GitHub
    GolangMirror { url: String },
    /// Anything else; no compare view is known
    Generic { url: String },
}

impl ProjectHost {
    /// Classify a project by its root import path
    pub fn for_project(name: &str) -> Self {
        if name.contains(urls::GITHUB_MARKER) {
            Self::GitHub {
                url: format!("https://{name}"),
            }
        } else if let Some(repo) = name.strip_prefix(urls::GOLANG_X_PREFIX) {
            Self::GolangMirror {
                url: format!("{}{repo}", urls::GOLANG_X_MIRROR),
            }
        } else {
            Self::Generic {
                url: format!("https://{name}"),
            }
        }
    }

    /// Project home page
    pub fn url(&self) -> &str {
        match self {
            Self::GitHub { url } | Self::GolangMirror { url } | Self::Generic { url } => url,
        }
    }

    /// Compare view between two refs, when the host has one
    pub fn compare_url(&self, previous: &str, current: &str) -> Option<String> {
        match self {
            Self::GitHub { url } | Self::GolangMirror { url } => {
                Some(format!("{url}/compare/{previous}...{current}"))
            }
            Self::Generic { .. } => None,
        }
    }
}

/// Render the pull request body for a diff
pub fn render_summary(diff: &SnapshotDiff) -> Result<String, RenderError> {
    let mut out = format!("{SUMMARY_HEADER}\n\n");
    for delta in &diff.modified {
        out.push_str(&render_line(delta)?);
        out.push('\n');
    }
    Ok(out)
}

/// Render one bullet line (without the trailing newline)
pub fn render_line(delta: &ProjectDelta) -> Result<String, RenderError> {
    let (previous, current) = change_labels(delta)?;
    let host = ProjectHost::for_project(&delta.name);

    let change = match host.compare_url(&previous, &current) {
        Some(compare) => format!("[{previous}...{current}]({compare})"),
        None => format!("{previous}...{current}"),
    };
    Ok(format!("* [{}]({}) {change}", delta.name, host.url()))
}

/// Previous/current labels for a delta
///
/// A side pinned by version is labelled with the version verbatim; any
/// other side gets its abbreviated revision.
pub fn change_labels(delta: &ProjectDelta) -> Result<(String, String), RenderError> {
    Ok((
        side_label(&delta.name, &delta.previous)?,
        side_label(&delta.name, &delta.current)?,
    ))
}

fn side_label(name: &str, identity: &ProjectIdentity) -> Result<String, RenderError> {
    match identity.version() {
        Some(version) => Ok(version.to_string()),
        None => short_revision(name, identity.revision()),
    }
}

/// Abbreviate a revision to its first characters, refusing ones that are too short
pub fn short_revision(name: &str, revision: &str) -> Result<String, RenderError> {
    let len = defaults::SHORT_REVISION_LEN;
    if revision.chars().count() < len {
        return Err(RenderError::ShortRevisionInput {
            name: name.to_string(),
            revision: revision.to_string(),
            required: len,
        });
    }
    let end = revision
        .char_indices()
        .nth(len)
        .map_or(revision.len(), |(index, _)| index);
    Ok(revision[..end].to_string())
}
