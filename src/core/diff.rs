//! Lock snapshot diffing
//!
//! Compares two [`LockSnapshot`]s keyed by project name. Every list in the
//! resulting [`SnapshotDiff`] is sorted by project name so that the rendered
//! summary is byte-for-byte reproducible.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::lock::{LockSnapshot, LockedProject, ProjectIdentity};

/// A before/after pair of plain strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringDelta {
    pub previous: String,
    pub current: String,
}

/// Change to one project present in both snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDelta {
    /// Project root import path
    pub name: String,

    /// Identity in the before-snapshot
    pub previous: ProjectIdentity,

    /// Identity in the after-snapshot
    pub current: ProjectIdentity,

    /// Source override change, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<StringDelta>,

    /// Subpackages only used after the update, sorted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages_added: Vec<String>,

    /// Subpackages no longer used after the update, sorted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages_removed: Vec<String>,
}

impl ProjectDelta {
    /// Whether the pin itself moved
    pub fn identity_changed(&self) -> bool {
        self.previous != self.current
    }

    /// Whether the set of used subpackages changed
    pub fn packages_changed(&self) -> bool {
        !self.packages_added.is_empty() || !self.packages_removed.is_empty()
    }
}

/// Structured difference between two lock snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotDiff {
    /// Projects only in the after-snapshot
    pub added: Vec<LockedProject>,

    /// Projects only in the before-snapshot
    pub removed: Vec<LockedProject>,

    /// Projects in both snapshots that differ
    pub modified: Vec<ProjectDelta>,
}

impl SnapshotDiff {
    /// True when the snapshots are equivalent
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Compute the difference between two snapshots
pub fn diff_snapshots(before: &LockSnapshot, after: &LockSnapshot) -> SnapshotDiff {
    let before_index = index_by_name(before);
    let after_index = index_by_name(after);

    let added = after_index
        .iter()
        .filter(|(name, _)| !before_index.contains_key(*name))
        .map(|(_, project)| (*project).clone())
        .collect();

    let removed = before_index
        .iter()
        .filter(|(name, _)| !after_index.contains_key(*name))
        .map(|(_, project)| (*project).clone())
        .collect();

    let modified = before_index
        .iter()
        .filter_map(|(name, old)| after_index.get(name).and_then(|new| diff_project(old, new)))
        .collect();

    SnapshotDiff {
        added,
        removed,
        modified,
    }
}

/// Index projects by name; the first entry wins on duplicates
fn index_by_name(snapshot: &LockSnapshot) -> BTreeMap<&str, &LockedProject> {
    let mut index = BTreeMap::new();
    for project in &snapshot.projects {
        index.entry(project.name.as_str()).or_insert(project);
    }
    index
}

fn diff_project(old: &LockedProject, new: &LockedProject) -> Option<ProjectDelta> {
    let source = (old.source != new.source).then(|| StringDelta {
        previous: old.source.clone(),
        current: new.source.clone(),
    });

    let old_packages: BTreeSet<&str> = old.packages.iter().map(String::as_str).collect();
    let new_packages: BTreeSet<&str> = new.packages.iter().map(String::as_str).collect();
    let packages_added: Vec<String> = new_packages
        .difference(&old_packages)
        .map(|p| (*p).to_string())
        .collect();
    let packages_removed: Vec<String> = old_packages
        .difference(&new_packages)
        .map(|p| (*p).to_string())
        .collect();

    let delta = ProjectDelta {
        name: old.name.clone(),
        previous: old.identity.clone(),
        current: new.identity.clone(),
        source,
        packages_added,
        packages_removed,
    };

    (delta.identity_changed() || delta.source.is_some() || delta.packages_changed())
        .then_some(delta)
}
