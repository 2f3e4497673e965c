//! Lock file handling
//!
//! The lock file (Gopkg.lock) records the exact revision every dependency
//! is pinned to. Parsing turns its text into a validated [`LockSnapshot`];
//! the raw TOML shape never escapes this module.

use serde::{Deserialize, Serialize};

use crate::error::LockError;

/// Raw lock file structure as written by `dep`
#[derive(Debug, Deserialize)]
struct RawLock {
    #[serde(default, rename = "solve-meta")]
    solve_meta: RawSolveMeta,

    #[serde(default)]
    projects: Vec<RawLockedProject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSolveMeta {
    #[serde(default)]
    inputs_digest: String,
    #[serde(default)]
    analyzer_name: String,
    #[serde(default)]
    analyzer_version: i64,
    #[serde(default)]
    solver_name: String,
    #[serde(default)]
    solver_version: i64,
}

#[derive(Debug, Deserialize)]
struct RawLockedProject {
    name: String,
    #[serde(default)]
    branch: String,
    #[serde(default)]
    revision: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    source: String,
    packages: Vec<String>,
}

/// Provenance of the solve that produced a lock file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveMeta {
    /// Digest of the solver inputs, decoded from hex
    #[serde(serialize_with = "serialize_hex")]
    pub inputs_digest: Vec<u8>,
    pub analyzer_name: String,
    pub analyzer_version: i64,
    pub solver_name: String,
    pub solver_version: i64,
}

/// How a dependency is pinned
///
/// A project is pinned by a bare revision, or by a version or branch
/// anchored to a revision. A version and a branch never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectIdentity {
    /// Immutable revision only
    Revision { revision: String },
    /// Semantic version anchored to a revision (which may be empty)
    VersionPair { version: String, revision: String },
    /// Branch anchored to a revision (which may be empty)
    BranchPair { branch: String, revision: String },
}

impl ProjectIdentity {
    /// Derive the identity from the raw fields of one lock entry
    pub fn from_fields(
        name: &str,
        branch: &str,
        version: &str,
        revision: &str,
    ) -> Result<Self, LockError> {
        match (branch.is_empty(), version.is_empty()) {
            (false, false) => Err(LockError::ConflictingIdentity {
                name: name.to_string(),
                branch: branch.to_string(),
                version: version.to_string(),
            }),
            (true, false) => Ok(Self::VersionPair {
                version: version.to_string(),
                revision: revision.to_string(),
            }),
            (false, true) => Ok(Self::BranchPair {
                branch: branch.to_string(),
                revision: revision.to_string(),
            }),
            (true, true) if revision.is_empty() => Err(LockError::MissingIdentity {
                name: name.to_string(),
            }),
            (true, true) => Ok(Self::Revision {
                revision: revision.to_string(),
            }),
        }
    }

    /// The underlying revision (possibly empty for paired identities)
    pub fn revision(&self) -> &str {
        match self {
            Self::Revision { revision }
            | Self::VersionPair { revision, .. }
            | Self::BranchPair { revision, .. } => revision,
        }
    }

    /// The version string, if pinned by version
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::VersionPair { version, .. } => Some(version),
            Self::Revision { .. } | Self::BranchPair { .. } => None,
        }
    }

    /// The branch name, if pinned by branch
    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::BranchPair { branch, .. } => Some(branch),
            Self::Revision { .. } | Self::VersionPair { .. } => None,
        }
    }
}

impl std::fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revision { revision } => write!(f, "rev:{revision}"),
            Self::VersionPair { version, revision } => write!(f, "{version} ({revision})"),
            Self::BranchPair { branch, revision } => write!(f, "branch:{branch} ({revision})"),
        }
    }
}

/// One pinned dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedProject {
    /// Project root import path, the diff key
    pub name: String,

    /// Alternate source location; empty means "derived from name"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,

    /// Pin of this project
    pub identity: ProjectIdentity,

    /// Subpackages in use
    pub packages: Vec<String>,
}

/// The parsed contents of one lock file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockSnapshot {
    pub solve_meta: SolveMeta,

    /// Projects in file order
    pub projects: Vec<LockedProject>,
}

impl LockSnapshot {
    /// Parse and validate lock file text
    ///
    /// Fails on the first malformed entry; nothing partial is returned.
    pub fn from_toml(content: &str) -> Result<Self, LockError> {
        let raw: RawLock = toml::from_str(content).map_err(|e| LockError::Syntax(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawLock) -> Result<Self, LockError> {
        let meta = raw.solve_meta;
        let inputs_digest =
            hex::decode(&meta.inputs_digest).map_err(|_| LockError::InvalidDigest {
                digest: meta.inputs_digest.clone(),
            })?;

        let projects = raw
            .projects
            .into_iter()
            .map(|p| {
                let identity =
                    ProjectIdentity::from_fields(&p.name, &p.branch, &p.version, &p.revision)?;
                Ok(LockedProject {
                    name: p.name,
                    source: p.source,
                    identity,
                    packages: p.packages,
                })
            })
            .collect::<Result<Vec<_>, LockError>>()?;

        Ok(Self {
            solve_meta: SolveMeta {
                inputs_digest,
                analyzer_name: meta.analyzer_name,
                analyzer_version: meta.analyzer_version,
                solver_name: meta.solver_name,
                solver_version: meta.solver_version,
            },
            projects,
        })
    }

    /// Look up a project by name
    pub fn project(&self, name: &str) -> Option<&LockedProject> {
        self.projects.iter().find(|p| p.name == name)
    }
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
