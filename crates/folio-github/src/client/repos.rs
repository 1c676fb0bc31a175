//! Repository listing with `Link` header pagination.

use tracing::{debug, info};

use super::GitHubClient;
use crate::error::GitHubError;
use crate::types::Repository;

/// Largest page size the API allows.
const PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Fetch every page of an account's repositories.
    pub(crate) fn fetch_repositories(&self, account: &str) -> Result<Vec<Repository>, GitHubError> {
        let mut next = Some(format!(
            "{}/users/{account}/repos?per_page={PER_PAGE}",
            self.api_url
        ));
        let mut repos = Vec::new();

        while let Some(url) = next.take() {
            debug!("Fetching {}", url);

            let response = self
                .get(&url)
                .header("Accept", "application/vnd.github+json")
                .call()?;

            let status = response.status().as_u16();
            next = response
                .headers()
                .get("link")
                .and_then(|value| value.to_str().ok())
                .and_then(next_link);
            let body = response.into_body().read_to_string()?;

            if status >= 400 {
                return Err(GitHubError::HttpResponse { status, body });
            }

            let mut page: Vec<Repository> = serde_json::from_str(&body)?;
            for repo in &mut page {
                repo.owner = account.to_owned();
            }
            repos.extend(page);
        }

        info!("Found {} repositories for {}", repos.len(), account);
        Ok(repos)
    }
}

/// Extract the `rel="next"` target from a `Link` header.
///
/// ```text
/// <https://api.github.com/user/1/repos?page=2>; rel="next", <...>; rel="last"
/// ```
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params.split(';').any(|param| {
            param
                .trim()
                .strip_prefix("rel=")
                .is_some_and(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
        });
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        is_next.then(|| target.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_next_link() {
        let header = r#"<https://api.github.com/user/1/repos?per_page=100&page=2>; rel="next", <https://api.github.com/user/1/repos?per_page=100&page=5>; rel="last""#;
        assert_eq!(
            next_link(header),
            Some("https://api.github.com/user/1/repos?per_page=100&page=2".to_owned())
        );
    }

    #[test]
    fn test_next_link_not_first() {
        let header = r#"<https://x/repos?page=1>; rel="prev", <https://x/repos?page=3>; rel="next""#;
        assert_eq!(next_link(header), Some("https://x/repos?page=3".to_owned()));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = r#"<https://x/repos?page=1>; rel="first", <https://x/repos?page=2>; rel="prev""#;
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn test_unquoted_and_multi_valued_rel() {
        assert_eq!(
            next_link("<https://x/a>; rel=next"),
            Some("https://x/a".to_owned())
        );
        assert_eq!(
            next_link(r#"<https://x/b>; rel="last next""#),
            Some("https://x/b".to_owned())
        );
    }

    #[test]
    fn test_malformed_entries_ignored() {
        assert_eq!(next_link(""), None);
        assert_eq!(next_link(r#"https://x/a; rel="next""#), None);
        assert_eq!(next_link("<https://x/a>"), None);
    }
}
