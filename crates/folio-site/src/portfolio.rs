//! Portfolio generation from GitHub repositories.

use std::cmp::Reverse;
use std::fs;

use folio_config::{PortfolioConfig, SiteConfig};
use folio_github::{RepoSource, Repository, readme_image_url};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::BuildError;
use crate::template::{self, Layout, PortfolioCard};

/// A repository selected for the portfolio.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortfolioEntry {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub html_url: String,
    /// README image URL, or the configured placeholder.
    pub thumbnail: String,
}

/// Builds the portfolio page from a [`RepoSource`].
pub struct PortfolioBuilder<'a, S: RepoSource> {
    source: &'a S,
    config: &'a PortfolioConfig,
    site: &'a SiteConfig,
}

impl<'a, S: RepoSource> PortfolioBuilder<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, config: &'a PortfolioConfig, site: &'a SiteConfig) -> Self {
        Self {
            source,
            config,
            site,
        }
    }

    /// Select, order and decorate repositories for display.
    ///
    /// Forks, hidden repositories, repositories without a description and
    /// those below `min_stars` are dropped. The rest are sorted by star count
    /// plus their configured offset, highest first; ties keep listing order.
    pub fn collect(&self) -> Result<Vec<PortfolioEntry>, BuildError> {
        let mut repos = Vec::new();
        for account in &self.config.accounts {
            repos.extend(self.source.list_repositories(account)?);
        }
        let listed = repos.len();

        repos.retain(|repo| self.is_listed(repo));
        repos.sort_by_key(|repo| Reverse(self.rank(repo)));
        debug!("Kept {} of {} repositories", repos.len(), listed);

        let entries = repos
            .into_par_iter()
            .map(|repo| {
                let thumbnail = self.thumbnail(&repo);
                PortfolioEntry {
                    name: repo.name,
                    description: repo.description.unwrap_or_default(),
                    stars: repo.stargazers_count,
                    html_url: repo.html_url,
                    thumbnail,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Render the portfolio page and write it to the configured output.
    ///
    /// Returns the number of repositories listed.
    pub fn build(&self) -> Result<usize, BuildError> {
        let entries = self.collect()?;

        let cards: Vec<PortfolioCard<'_>> = entries
            .iter()
            .map(|entry| PortfolioCard {
                name: &entry.name,
                description: &entry.description,
                stars: entry.stars,
                html_url: &entry.html_url,
                thumbnail: &entry.thumbnail,
            })
            .collect();
        let layout = Layout {
            site_title: &self.site.title,
            stylesheet: &self.site.stylesheet,
        };
        let html = template::render_portfolio(&layout, &cards);

        let output = &self.config.output;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
        }
        fs::write(output, html).map_err(BuildError::io(output))?;

        info!("Wrote {} repositories to {}", entries.len(), output.display());
        Ok(entries.len())
    }

    fn is_listed(&self, repo: &Repository) -> bool {
        !repo.fork
            && repo.stargazers_count >= self.config.min_stars
            && repo
                .description
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty())
            && !self.config.hidden.contains(&repo.name)
    }

    fn rank(&self, repo: &Repository) -> i64 {
        let stars = i64::try_from(repo.stargazers_count).unwrap_or(i64::MAX);
        let offset = self.config.star_offsets.get(&repo.name).copied().unwrap_or(0);
        stars.saturating_add(offset)
    }

    /// README image for the repository, falling back to the placeholder.
    fn thumbnail(&self, repo: &Repository) -> String {
        let readme = match self.source.readme(&repo.owner, &repo.name) {
            Ok(readme) => readme,
            Err(err) => {
                warn!("Failed to fetch README for {}/{}: {}", repo.owner, repo.name, err);
                None
            }
        };
        readme
            .and_then(|content| {
                readme_image_url(&content, &repo.owner, &repo.name, &self.config.branch)
            })
            .unwrap_or_else(|| self.config.placeholder.clone())
    }
}

#[cfg(test)]
mod tests {
    use folio_github::{GitHubError, MockRepoSource};
    use pretty_assertions::assert_eq;

    use super::*;

    fn repo(name: &str, stars: u64, description: Option<&str>) -> Repository {
        Repository {
            name: name.to_owned(),
            description: description.map(str::to_owned),
            stargazers_count: stars,
            html_url: format!("https://github.com/x/{name}"),
            fork: false,
            owner: String::new(),
        }
    }

    fn config(accounts: &[&str]) -> PortfolioConfig {
        PortfolioConfig {
            accounts: accounts.iter().map(|&a| a.to_owned()).collect(),
            ..Default::default()
        }
    }

    fn names(entries: &[PortfolioEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_filters_repositories() {
        let source = MockRepoSource::new()
            .with_repository("me", repo("kept", 10, Some("Useful")))
            .with_repository(
                "me",
                Repository {
                    fork: true,
                    ..repo("forked", 50, Some("Someone else's"))
                },
            )
            .with_repository("me", repo("unpopular", 1, Some("Few stars")))
            .with_repository("me", repo("undocumented", 30, None))
            .with_repository("me", repo("blank", 30, Some("   ")))
            .with_repository("me", repo("secret", 30, Some("Hidden")));
        let mut config = config(&["me"]);
        config.hidden = vec!["secret".to_owned()];
        let site = SiteConfig::default();

        let entries = PortfolioBuilder::new(&source, &config, &site)
            .collect()
            .unwrap();

        assert_eq!(names(&entries), vec!["kept"]);
    }

    #[test]
    fn test_sorts_by_stars_with_offsets() {
        let source = MockRepoSource::new()
            .with_repository("me", repo("small", 5, Some("a")))
            .with_repository("me", repo("big", 100, Some("b")))
            .with_repository("org", repo("boosted", 10, Some("c")))
            .with_repository("org", repo("sunk", 90, Some("d")));
        let mut config = config(&["me", "org"]);
        config.star_offsets.insert("boosted".to_owned(), 200);
        config.star_offsets.insert("sunk".to_owned(), -100);
        let site = SiteConfig::default();

        let entries = PortfolioBuilder::new(&source, &config, &site)
            .collect()
            .unwrap();

        assert_eq!(names(&entries), vec!["boosted", "big", "small", "sunk"]);
        // Displayed stars are the real count.
        assert_eq!(entries[0].stars, 10);
    }

    #[test]
    fn test_ties_keep_listing_order() {
        let source = MockRepoSource::new()
            .with_repository("me", repo("first", 7, Some("a")))
            .with_repository("me", repo("second", 7, Some("b")))
            .with_repository("me", repo("third", 7, Some("c")));
        let config = config(&["me"]);
        let site = SiteConfig::default();

        let entries = PortfolioBuilder::new(&source, &config, &site)
            .collect()
            .unwrap();

        assert_eq!(names(&entries), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_thumbnails_use_owner_and_placeholder() {
        let source = MockRepoSource::new()
            .with_repository("org", repo("pictured", 5, Some("a")))
            .with_repository("org", repo("plain", 4, Some("b")))
            .with_readme("org", "pictured", "![shot](/img/shot.png)")
            .with_readme("org", "plain", "# No images");
        let mut config = config(&["org"]);
        config.branch = "trunk".to_owned();
        let site = SiteConfig::default();

        let entries = PortfolioBuilder::new(&source, &config, &site)
            .collect()
            .unwrap();

        assert_eq!(
            entries[0].thumbnail,
            "https://raw.githubusercontent.com/org/pictured/trunk/img/shot.png"
        );
        assert_eq!(entries[1].thumbnail, "placeholder.jpg");
    }

    #[test]
    fn test_listing_failure_is_an_error() {
        let source = MockRepoSource::new().with_failing_account("broken");
        let config = config(&["broken"]);
        let site = SiteConfig::default();

        let err = PortfolioBuilder::new(&source, &config, &site)
            .collect()
            .unwrap_err();

        assert!(matches!(
            err,
            BuildError::GitHub(GitHubError::HttpResponse { status: 500, .. })
        ));
    }

    #[test]
    fn test_build_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockRepoSource::new()
            .with_repository("me", repo("folio", 3, Some("Static <site> toolkit")));
        let config = PortfolioConfig {
            output: dir.path().join("out").join("portfolio.html"),
            ..config(&["me"])
        };
        let site = SiteConfig::default();

        let count = PortfolioBuilder::new(&source, &config, &site)
            .build()
            .unwrap();

        assert_eq!(count, 1);
        let html = fs::read_to_string(&config.output).unwrap();
        assert!(html.contains(r#"<div class="portfolio-title">folio</div>"#));
        assert!(html.contains("Static &lt;site&gt; toolkit"));
        assert!(html.contains(r#"<img src="placeholder.jpg" alt="folio thumbnail">"#));
    }
}
