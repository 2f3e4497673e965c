//! Default configuration values

/// Lock file written by `dep`
pub const LOCK_FILE: &str = "Gopkg.lock";

/// Project-local settings file name
pub const SETTINGS_FILE: &str = "dep-update.toml";

/// Branch the pull request targets
pub const BASE_BRANCH: &str = "master";

/// Resolver invocation that refreshes the lock file
pub const RESOLVER_COMMAND: &[&str] = &["dep", "ensure", "-update"];

/// Remote that carries the token-bearing push URL
pub const REMOTE_NAME: &str = "github-url-with-token";

/// Commit message for the refreshed lock file
pub const COMMIT_MESSAGE: &str = "Run 'dep ensure -update'";

/// Prefix of the update branch; a timestamp follows
pub const BRANCH_PREFIX: &str = "dep-update-";

/// Length revisions are abbreviated to in the change summary
pub const SHORT_REVISION_LEN: usize = 7;

/// Maximum time spent retrying the pull request call (in seconds)
pub const PULL_REQUEST_RETRY_SECS: u64 = 60;
