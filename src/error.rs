//! Error types for ci-dep-update
//!
//! Domain-specific error types using thiserror. Infrastructure errors live
//! next to the code that raises them (see [`crate::infra`]).

use std::path::PathBuf;
use thiserror::Error;

/// Lock file parsing and validation errors
///
/// Any of these aborts the whole parse; no partial snapshot is returned.
#[derive(Error, Debug, PartialEq)]
pub enum LockError {
    /// The text is not a well-formed lock document
    #[error("Failed to parse lock file: {0}")]
    Syntax(String),

    /// The `inputs-digest` field is not valid hexadecimal
    #[error("invalid hash digest in lock's memo field: '{digest}'")]
    InvalidDigest { digest: String },

    /// A project pins both a branch and a version
    #[error("lock file specified both a branch ({branch}) and version ({version}) for {name}")]
    ConflictingIdentity {
        name: String,
        branch: String,
        version: String,
    },

    /// A project pins nothing at all
    #[error("lock file has entry for {name}, but specifies no branch or version")]
    MissingIdentity { name: String },
}

/// Change summary rendering errors
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    /// A revision label is shorter than the abbreviated form
    #[error("revision '{revision}' for {name} is shorter than {required} characters")]
    ShortRevisionInput {
        name: String,
        revision: String,
        required: usize,
    },
}

/// Settings resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting was not supplied by flag, environment or file
    #[error("please set {setting}")]
    MissingSetting { setting: &'static str },

    /// Repository is neither `owner/repo` nor a GitHub URL
    #[error("Invalid repository '{value}': expected 'owner/repo' or 'https://github.com/owner/repo'")]
    InvalidRepository { value: String },

    /// Failed to read settings file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },
}
