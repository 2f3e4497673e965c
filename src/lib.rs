//! ci-dep-update - keep a dep lock file fresh from CI
//!
//! Runs `dep ensure -update`, and when the lock file moves, pushes a
//! branch and opens a pull request listing which dependencies changed.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (lock parsing, diffing, rendering, workflow)
//! - [`infra`] - Infrastructure layer (resolver subprocess, git, GitHub)
//! - [`config`] - Constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
