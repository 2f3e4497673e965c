//! Run command implementation
//!
//! Implements `ci-dep-update run`, the full update workflow.

use std::path::Path;

use anyhow::{Context, Result};

use super::RunArgs;
use crate::cli::output::{create_spinner, status};
use crate::core::config::{FileConfig, SettingsOverrides, UpdateSettings};
use crate::core::update::{run_update, UpdateOutcome};

/// Execute the run command
pub async fn execute(project_dir: &Path, args: RunArgs, quiet: bool) -> Result<()> {
    let file = FileConfig::discover(project_dir, args.config.as_deref())?;
    let overrides = SettingsOverrides {
        token: args.github_access_token,
        user: args.user,
        email: args.email,
        repository: args.repository,
        base_branch: args.base,
        dry_run: args.dry_run,
    };
    let settings = UpdateSettings::resolve(project_dir.to_path_buf(), overrides, file)?;

    let spinner = (!quiet).then(|| create_spinner("Updating dependencies..."));
    let result = run_update(&settings).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = result.context("Dependency update failed")?;

    match outcome {
        UpdateOutcome::UpToDate => {
            if !quiet {
                println!("{} {} is up to date", status::SUCCESS, settings.lock_file);
            }
        }
        UpdateOutcome::DryRun { branch, draft } => {
            println!("{} Dry run, would push {branch}", status::INFO);
            println!("Title: {}", draft.title);
            println!("Head:  {}", draft.head);
            println!("Base:  {}", draft.base);
            println!();
            print!("{}", draft.body);
        }
        UpdateOutcome::PullRequestOpened {
            number,
            url,
            branch,
        } => {
            if !quiet {
                println!("{} Pushed {branch}", status::SUCCESS);
            }
            println!("{} Opened pull request #{number}: {url}", status::SUCCESS);
        }
    }
    Ok(())
}
