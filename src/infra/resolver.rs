//! Dependency resolver invocation
//!
//! Runs the external resolver (`dep ensure -update` by default) in the
//! project directory. The resolver may rewrite the lock file; whether it
//! did is decided afterwards by [`crate::infra::git`].

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Resolver errors
#[derive(Error, Debug)]
pub enum ResolverError {
    /// No command configured
    #[error("No resolver command configured")]
    EmptyCommand,

    /// Executable not on PATH
    #[error("Resolver '{program}' not found in PATH")]
    NotFound { program: String },

    /// Process could not be started
    #[error("Failed to start '{command}': {error}")]
    SpawnFailed { command: String, error: String },

    /// Resolver exited unsuccessfully
    #[error("run {program} failed. cause: {output}")]
    Failed { program: String, output: String },
}

/// A resolver invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverCommand {
    program: String,
    args: Vec<String>,
}

impl ResolverCommand {
    /// Build from an argv list; the first element is the program
    pub fn from_argv(argv: &[String]) -> Result<Self, ResolverError> {
        let (program, args) = argv.split_first().ok_or(ResolverError::EmptyCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Human-readable command line
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the resolver in `work_dir`
    ///
    /// On failure the combined stdout and stderr is returned in the error.
    pub fn run(&self, work_dir: &Path) -> Result<(), ResolverError> {
        which::which(&self.program).map_err(|_| ResolverError::NotFound {
            program: self.program.clone(),
        })?;

        tracing::info!("Running {}", self.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(work_dir)
            .output()
            .map_err(|e| ResolverError::SpawnFailed {
                command: self.display(),
                error: e.to_string(),
            })?;

        if output.status.success() {
            tracing::debug!("{} finished", self.display());
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(ResolverError::Failed {
            program: self.program.clone(),
            output: combined.trim_end().to_string(),
        })
    }
}
