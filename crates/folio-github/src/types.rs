//! GitHub API response types.

use serde::Deserialize;

/// A repository as returned by `GET /users/{account}/repos`.
///
/// Only the fields the portfolio needs are kept.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
    /// Account the repository was listed under. Not part of the payload;
    /// filled in by the [`RepoSource`](crate::RepoSource).
    #[serde(skip)]
    pub owner: String,
}
