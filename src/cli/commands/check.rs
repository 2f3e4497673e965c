//! Check command implementation
//!
//! Implements `ci-dep-update check` to validate a lock file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::status;
use crate::core::update::read_snapshot;

/// Execute the check command
pub fn execute(lock_path: &Path) -> Result<()> {
    let lock = read_snapshot(lock_path)
        .with_context(|| format!("Failed to load {}", lock_path.display()))?;

    println!("{} {} is valid", status::SUCCESS, lock_path.display());
    println!("  Projects:      {}", lock.projects.len());
    println!(
        "  Inputs digest: {}",
        hex::encode(&lock.solve_meta.inputs_digest)
    );
    println!(
        "  Solver:        {} v{}",
        lock.solve_meta.solver_name, lock.solve_meta.solver_version
    );
    Ok(())
}
