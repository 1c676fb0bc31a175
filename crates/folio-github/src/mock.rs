//! Mock repository source for testing.
//!
//! Provides [`MockRepoSource`] for unit testing without network access.

use std::collections::{HashMap, HashSet};

use crate::error::GitHubError;
use crate::source::RepoSource;
use crate::types::Repository;

/// Mock repository source for testing.
///
/// Stores repositories and READMEs in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use folio_github::{MockRepoSource, RepoSource, Repository};
///
/// let source = MockRepoSource::new()
///     .with_repository("octocat", Repository { name: "demo".into(), ..Default::default() })
///     .with_readme("octocat", "demo", "![shot](shot.png)");
///
/// let repos = source.list_repositories("octocat").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockRepoSource {
    repositories: HashMap<String, Vec<Repository>>,
    readmes: HashMap<(String, String), String>,
    failing: HashSet<String>,
}

impl MockRepoSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository listed under `account`.
    #[must_use]
    pub fn with_repository(mut self, account: &str, mut repo: Repository) -> Self {
        repo.owner = account.to_owned();
        self.repositories
            .entry(account.to_owned())
            .or_default()
            .push(repo);
        self
    }

    /// Set the README content of `owner/repo`.
    #[must_use]
    pub fn with_readme(mut self, owner: &str, repo: &str, content: &str) -> Self {
        self.readmes
            .insert((owner.to_owned(), repo.to_owned()), content.to_owned());
        self
    }

    /// Make listing `account` fail with a server error.
    #[must_use]
    pub fn with_failing_account(mut self, account: &str) -> Self {
        self.failing.insert(account.to_owned());
        self
    }
}

impl RepoSource for MockRepoSource {
    fn list_repositories(&self, account: &str) -> Result<Vec<Repository>, GitHubError> {
        if self.failing.contains(account) {
            return Err(GitHubError::HttpResponse {
                status: 500,
                body: format!("mock failure for {account}"),
            });
        }
        Ok(self.repositories.get(account).cloned().unwrap_or_default())
    }

    fn readme(&self, owner: &str, repo: &str) -> Result<Option<String>, GitHubError> {
        Ok(self
            .readmes
            .get(&(owner.to_owned(), repo.to_owned()))
            .cloned())
    }
}
