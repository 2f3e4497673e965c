//! Code hosting URLs

/// GitHub REST API base URL
pub const GITHUB_API: &str = "https://api.github.com";

/// Host used for the token-bearing push remote
pub const GITHUB_HOST: &str = "github.com";

/// Domain whose projects are linked directly
pub const GITHUB_MARKER: &str = "github.com";

/// Import-path prefix of the Go sub-repositories
pub const GOLANG_X_PREFIX: &str = "golang.org/x/";

/// GitHub mirror of the Go sub-repositories
pub const GOLANG_X_MIRROR: &str = "https://github.com/golang/";

/// Suffix of the no-reply commit address derived from a user name
pub const NOREPLY_EMAIL_DOMAIN: &str = "users.noreply.github.com";
