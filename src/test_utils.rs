//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::lock::{LockSnapshot, LockedProject, ProjectIdentity, SolveMeta};

    /// Generate a project root from a small pool so snapshots overlap
    pub fn project_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "github\\.com/acme/[a-f]",
            "golang\\.org/x/(net|sys|text)",
            "gopkg\\.in/(yaml|check)\\.v[1-2]",
        ]
    }

    /// Generate a full-length revision hash (40 hex characters)
    pub fn revision() -> impl Strategy<Value = String> {
        "[0-9a-f]{40}"
    }

    /// Generate a `v`-prefixed semantic version
    pub fn semver_version() -> impl Strategy<Value = String> {
        (0u32..5, 0u32..20, 0u32..10)
            .prop_map(|(major, minor, patch)| format!("v{major}.{minor}.{patch}"))
    }

    /// Generate the revision anchoring a version or branch, which may be empty
    pub fn paired_revision() -> impl Strategy<Value = String> {
        prop_oneof![3 => revision(), 1 => Just(String::new())]
    }

    /// Generate any of the three identity shapes
    pub fn identity() -> impl Strategy<Value = ProjectIdentity> {
        prop_oneof![
            revision().prop_map(|revision| ProjectIdentity::Revision { revision }),
            (semver_version(), paired_revision())
                .prop_map(|(version, revision)| ProjectIdentity::VersionPair { version, revision }),
            (prop_oneof!["master", "main", "develop"], paired_revision()).prop_map(
                |(branch, revision)| ProjectIdentity::BranchPair { branch, revision }
            ),
        ]
    }

    /// Generate a locked project with the given name
    pub fn locked_project(name: String) -> impl Strategy<Value = LockedProject> {
        (
            identity(),
            prop::collection::vec("\\.|internal|cmd/[a-c]", 0..4),
            prop_oneof![Just(String::new()), Just(format!("https://mirror.example/{name}"))],
        )
            .prop_map(move |(identity, packages, source)| LockedProject {
                name: name.clone(),
                source,
                identity,
                packages,
            })
    }

    /// Generate a snapshot with unique project names in arbitrary order
    pub fn lock_snapshot() -> impl Strategy<Value = LockSnapshot> {
        prop::collection::btree_set(project_name(), 0..10)
            .prop_flat_map(|names| {
                names
                    .into_iter()
                    .map(locked_project)
                    .collect::<Vec<_>>()
                    .prop_shuffle()
            })
            .prop_map(|projects| LockSnapshot {
                solve_meta: SolveMeta {
                    inputs_digest: vec![0xab; 32],
                    analyzer_name: "dep".to_string(),
                    analyzer_version: 1,
                    solver_name: "gps-cdcl".to_string(),
                    solver_version: 1,
                },
                projects,
            })
    }

    /// Generate a before/after pair
    pub fn snapshot_pair() -> impl Strategy<Value = (LockSnapshot, LockSnapshot)> {
        (lock_snapshot(), lock_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_revision_generator(rev in revision()) {
            prop_assert_eq!(rev.len(), 40);
            prop_assert!(rev.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_paired_revision_generator(rev in paired_revision()) {
            prop_assert!(rev.is_empty() || rev.len() == 40);
        }

        #[test]
        fn test_snapshot_names_unique(snapshot in lock_snapshot()) {
            let mut names: Vec<&str> = snapshot.projects.iter().map(|p| p.name.as_str()).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(names.len(), total);
        }
    }
}
