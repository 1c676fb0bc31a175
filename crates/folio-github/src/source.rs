//! Repository source abstraction.

use crate::error::GitHubError;
use crate::types::Repository;

/// Where portfolio repositories come from.
///
/// Implemented by [`GitHubClient`](crate::GitHubClient) for real runs and by
/// `MockRepoSource` for tests.
pub trait RepoSource: Send + Sync {
    /// List every repository of a user or organization, with
    /// [`Repository::owner`] set to `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page cannot be fetched or parsed.
    fn list_repositories(&self, account: &str) -> Result<Vec<Repository>, GitHubError>;

    /// Raw README content, or `None` if the repository has no readable README.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures.
    fn readme(&self, owner: &str, repo: &str) -> Result<Option<String>, GitHubError>;
}
