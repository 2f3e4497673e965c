//! Settings resolution
//!
//! Combines command-line flags (and their environment variables), an
//! optional `dep-update.toml` settings file, and built-in defaults into the
//! [`UpdateSettings`] the update workflow runs with. Flags win over the
//! file, the file wins over defaults. The access token is only ever taken
//! from the command line or environment.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{defaults, urls};
use crate::error::ConfigError;

/// Application directory name under the user config dir
const APP_NAME: &str = "ci-dep-update";

/// Global settings file name
const GLOBAL_SETTINGS_FILE: &str = "config.toml";

/// Accepts `owner/repo` or a GitHub URL, with an optional `.git` suffix
static REPOSITORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://github\.com/)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
        .expect("repository pattern is valid")
});

/// Settings file contents
///
/// Every key is optional; missing keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Lock file path relative to the project directory
    pub lock_file: Option<String>,

    /// Branch the pull request targets
    pub base_branch: Option<String>,

    /// Resolver argv, e.g. `["dep", "ensure", "-update"]`
    pub resolver: Option<Vec<String>>,

    /// Remote used for pushing the update branch
    pub remote_name: Option<String>,

    /// Commit message for the lock file change
    pub commit_message: Option<String>,

    /// Git user name
    pub user: Option<String>,

    /// Git user email
    pub email: Option<String>,

    /// Repository (`owner/repo`)
    pub repository: Option<String>,
}

impl FileConfig {
    /// Load settings from a specific path
    ///
    /// A missing file yields the default (empty) settings.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Find the settings that apply to a project
    ///
    /// An explicit path must exist. Otherwise the project's
    /// `dep-update.toml` is used, then the global settings file.
    pub fn discover(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    error: "file not found".to_string(),
                });
            }
            return Self::load_from_path(path);
        }

        let local = project_dir.join(defaults::SETTINGS_FILE);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        match Self::global_path() {
            Some(global) => Self::load_from_path(&global),
            None => Ok(Self::default()),
        }
    }

    /// Path of the per-user settings file
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join(GLOBAL_SETTINGS_FILE))
    }
}

/// A GitHub repository coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Parse `owner/repo` or `https://github.com/owner/repo[.git]`
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository {
            value: value.to_string(),
        };

        let caps = REPOSITORY_REGEX
            .captures(value.trim())
            .ok_or_else(invalid)?;

        Ok(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub access token; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building requests
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub token: Option<String>,
    pub user: Option<String>,
    pub email: Option<String>,
    pub repository: Option<String>,
    pub base_branch: Option<String>,
    pub dry_run: bool,
}

/// Fully resolved settings for one update run
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    /// Project (and git work tree) directory
    pub project_dir: PathBuf,
    /// Lock file path relative to `project_dir`
    pub lock_file: String,
    pub base_branch: String,
    /// Resolver argv; the first element is the program
    pub resolver: Vec<String>,
    pub remote_name: String,
    pub commit_message: String,
    pub user: String,
    pub email: String,
    pub repository: Repository,
    pub token: AccessToken,
    /// Stop before touching git history or GitHub
    pub dry_run: bool,
}

impl UpdateSettings {
    /// Merge flags, settings file and defaults, then validate
    ///
    /// Required values are checked in the order user, repository, token.
    pub fn resolve(
        project_dir: PathBuf,
        overrides: SettingsOverrides,
        file: FileConfig,
    ) -> Result<Self, ConfigError> {
        let user = non_empty(overrides.user)
            .or(non_empty(file.user))
            .ok_or(ConfigError::MissingSetting {
                setting: "Git user name",
            })?;
        let repository = non_empty(overrides.repository)
            .or(non_empty(file.repository))
            .ok_or(ConfigError::MissingSetting {
                setting: "repository URL",
            })?;
        let token = non_empty(overrides.token).ok_or(ConfigError::MissingSetting {
            setting: "GitHub access token",
        })?;

        let repository = Repository::parse(&repository)?;
        let email = non_empty(overrides.email)
            .or(non_empty(file.email))
            .unwrap_or_else(|| default_email(&user));

        let resolver = file
            .resolver
            .filter(|argv| !argv.is_empty())
            .unwrap_or_else(|| {
                defaults::RESOLVER_COMMAND
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect()
            });

        Ok(Self {
            project_dir,
            lock_file: non_empty(file.lock_file).unwrap_or_else(|| defaults::LOCK_FILE.to_string()),
            base_branch: non_empty(overrides.base_branch)
                .or(non_empty(file.base_branch))
                .unwrap_or_else(|| defaults::BASE_BRANCH.to_string()),
            resolver,
            remote_name: non_empty(file.remote_name)
                .unwrap_or_else(|| defaults::REMOTE_NAME.to_string()),
            commit_message: non_empty(file.commit_message)
                .unwrap_or_else(|| defaults::COMMIT_MESSAGE.to_string()),
            user,
            email,
            repository,
            token: AccessToken::new(token),
            dry_run: overrides.dry_run,
        })
    }

    /// Absolute path of the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.project_dir.join(&self.lock_file)
    }

    /// Push URL carrying the access token
    pub fn push_url(&self) -> String {
        format!(
            "https://{}@{}/{}",
            self.token.expose(),
            urls::GITHUB_HOST,
            self.repository
        )
    }
}

/// The no-reply address GitHub assigns to a user name
pub fn default_email(user: &str) -> String {
    format!("{user}@{}", urls::NOREPLY_EMAIL_DOMAIN)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
