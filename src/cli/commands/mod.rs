//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod diff;
pub mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update the lock file and open a pull request when it changes
    Run(RunArgs),

    /// Show what changed between two lock files
    Diff {
        /// Lock file before the update
        before: PathBuf,

        /// Lock file after the update
        after: PathBuf,

        /// Print the structured diff as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a lock file
    Check {
        /// Lock file to check
        #[arg(default_value = "Gopkg.lock")]
        lock: PathBuf,
    },
}

/// Arguments for `run`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// GitHub access token
    #[arg(long = "github_access_token", env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    pub github_access_token: Option<String>,

    /// Git user name
    #[arg(short, long, env = "GIT_USER_NAME")]
    pub user: Option<String>,

    /// Git user email (defaults to the GitHub no-reply address)
    #[arg(short, long, env = "GIT_USER_EMAIL")]
    pub email: Option<String>,

    /// Repository, as owner/repo or a GitHub URL
    #[arg(short, long, env = "REPOSITORY_URL")]
    pub repository: Option<String>,

    /// Settings file (defaults to dep-update.toml in the project directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Branch the pull request targets
    #[arg(long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// Stop after rendering the pull request
    #[arg(long)]
    pub dry_run: bool,

    /// Project directory
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, quiet: bool) -> Result<()> {
        match self {
            Self::Run(args) => {
                let project_dir = match &args.path {
                    Some(path) => path.clone(),
                    None => std::env::current_dir()?,
                };
                run::execute(&project_dir, args, quiet).await
            }
            Self::Diff {
                before,
                after,
                json,
            } => diff::execute(&before, &after, json),
            Self::Check { lock } => check::execute(&lock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "ci-dep-update",
            "run",
            "--github_access_token",
            "t0ken",
            "-u",
            "octocat",
            "-r",
            "octocat/hello",
            "--dry-run",
        ])
        .unwrap();

        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.github_access_token.as_deref(), Some("t0ken"));
        assert_eq!(args.user.as_deref(), Some("octocat"));
        assert_eq!(args.repository.as_deref(), Some("octocat/hello"));
        assert!(args.dry_run);
    }

    #[test]
    fn test_parse_diff() {
        let cli = Cli::try_parse_from(["ci-dep-update", "-vv", "diff", "a.lock", "b.lock", "--json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Diff { json: true, .. })));
    }

    #[test]
    fn test_check_defaults_to_gopkg_lock() {
        let cli = Cli::try_parse_from(["ci-dep-update", "check"]).unwrap();
        let Some(Commands::Check { lock }) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(lock, PathBuf::from("Gopkg.lock"));
    }
}
