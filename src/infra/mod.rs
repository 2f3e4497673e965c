//! Infrastructure layer
//!
//! Handles all I/O operations: subprocesses, git and the GitHub API.
//! This module is the only place where side effects occur.

pub mod git;
pub mod github;
pub mod resolver;
