//! Diff command implementation
//!
//! Implements `ci-dep-update diff` to compare two lock files offline.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::diff::diff_snapshots;
use crate::core::summary::render_summary;
use crate::core::update::read_snapshot;

/// Execute the diff command
pub fn execute(before: &Path, after: &Path, json: bool) -> Result<()> {
    let before_lock = read_snapshot(before)
        .with_context(|| format!("Failed to load {}", before.display()))?;
    let after_lock =
        read_snapshot(after).with_context(|| format!("Failed to load {}", after.display()))?;

    let diff = diff_snapshots(&before_lock, &after_lock);

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print!("{}", render_summary(&diff)?);
    }
    Ok(())
}
