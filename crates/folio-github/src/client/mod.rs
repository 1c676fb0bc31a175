//! GitHub REST API client.
//!
//! Provides a sync HTTP client for the public repository and README
//! endpoints, with optional bearer token authentication.

mod readme;
mod repos;

use std::time::Duration;

use ureq::typestate::WithoutBody;
use ureq::{Agent, RequestBuilder};

use crate::error::GitHubError;
use crate::source::RepoSource;
use crate::types::Repository;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// REST API version pinned in every request.
const API_VERSION: &str = "2022-11-28";

/// GitHub rejects requests without a user agent.
const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API client.
pub struct GitHubClient {
    agent: Agent,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for the API at `api_url`.
    ///
    /// # Arguments
    /// * `api_url` - REST API base URL (`https://api.github.com` for github.com)
    /// * `token` - Personal access token, sent as `Authorization: Bearer`
    #[must_use]
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Start a GET request with the common headers.
    fn get(&self, url: &str) -> RequestBuilder<WithoutBody> {
        let request = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }
}

impl RepoSource for GitHubClient {
    fn list_repositories(&self, account: &str) -> Result<Vec<Repository>, GitHubError> {
        self.fetch_repositories(account)
    }

    fn readme(&self, owner: &str, repo: &str) -> Result<Option<String>, GitHubError> {
        self.fetch_readme(owner, repo)
    }
}
