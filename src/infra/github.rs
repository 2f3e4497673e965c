//! GitHub REST API client
//!
//! Opens the update pull request. Network failures and 5xx responses are
//! retried with exponential backoff; any other non-success status is final.

use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{defaults, urls};
use crate::core::config::AccessToken;

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Network error
    #[error("Network error calling '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// API returned a non-success status
    #[error("GitHub API returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to parse GitHub response: {error}")]
    InvalidResponse { error: String },
}

/// Request body for `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    /// `owner:branch`
    pub head: String,
    pub base: String,
    pub body: String,
}

/// The fields of a created pull request we use
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Retry timing for API calls
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_elapsed: Duration::from_secs(defaults::PULL_REQUEST_RETRY_SECS),
        }
    }
}

/// GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client
    client: reqwest::Client,
    /// API base URL
    api_url: String,
    token: AccessToken,
    retry: RetryPolicy,
}

impl GitHubClient {
    /// Create a client for api.github.com
    pub fn new(token: AccessToken) -> Self {
        Self::with_api_url(urls::GITHUB_API.to_string(), token)
    }

    /// Create a client against a custom API base URL
    pub fn with_api_url(api_url: String, token: AccessToken) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            retry: RetryPolicy::default(),
        }
    }

    /// Override retry timing
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Open a pull request on `owner/repo`
    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        request: &NewPullRequest,
    ) -> Result<PullRequest, GitHubError> {
        let url = format!("{}/repos/{owner}/{repo}/pulls", self.api_url);
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.retry.initial_interval)
            .with_max_elapsed_time(Some(self.retry.max_elapsed))
            .build();

        let url = url.as_str();
        let client = &self.client;
        let token = self.token.expose();

        backoff::future::retry(policy, move || async move {
            tracing::debug!("POST {url}");
            let sent = client
                .post(url)
                .bearer_auth(token)
                .header("User-Agent", user_agent())
                .header("Accept", "application/vnd.github+json")
                .json(request)
                .send()
                .await;
            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Pull request call failed, retrying: {e}");
                    return Err(backoff::Error::transient(GitHubError::NetworkError {
                        url: url.to_string(),
                        error: e.to_string(),
                    }));
                }
            };

            let status = response.status();
            if status.is_success() {
                return response.json::<PullRequest>().await.map_err(|e| {
                    backoff::Error::permanent(GitHubError::InvalidResponse {
                        error: e.to_string(),
                    })
                });
            }

            let error = GitHubError::ApiError {
                status: status.as_u16(),
                message: api_message(&response.text().await.unwrap_or_default()),
            };
            if status.is_server_error() {
                tracing::warn!("{error}, retrying");
                Err(backoff::Error::transient(error))
            } else {
                Err(backoff::Error::permanent(error))
            }
        })
        .await
    }
}

/// `User-Agent` header value; GitHub rejects requests without one
fn user_agent() -> String {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) => format!("ci-dep-update/{} ({sha})", env!("CARGO_PKG_VERSION")),
        None => format!("ci-dep-update/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Pull the `message` field out of a GitHub error body
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
