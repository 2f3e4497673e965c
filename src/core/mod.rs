//! Core business logic module
//!
//! The lock parser, diff engine and summary renderer are pure functions
//! over values. Settings resolution and the update workflow sequence the
//! side effects that live in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`lock`] - Lock file (Gopkg.lock) parsing and validation
//! - [`diff`] - Snapshot comparison
//! - [`summary`] - Markdown change summary
//! - [`config`] - Settings resolution
//! - [`update`] - Update workflow

pub mod config;
pub mod diff;
pub mod lock;
pub mod summary;
pub mod update;
