//! README retrieval.

use tracing::warn;

use super::GitHubClient;
use crate::error::GitHubError;

impl GitHubClient {
    /// Fetch the raw README of a repository.
    ///
    /// Any non-200 status means the repository has no usable README.
    pub(crate) fn fetch_readme(&self, owner: &str, repo: &str) -> Result<Option<String>, GitHubError> {
        let url = format!("{}/repos/{owner}/{repo}/readme", self.api_url);

        let response = self
            .get(&url)
            .header("Accept", "application/vnd.github.v3.raw")
            .call()?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!("No README for {}/{} (HTTP {})", owner, repo, status);
            return Ok(None);
        }

        Ok(Some(response.into_body().read_to_string()?))
    }
}
