//! Configuration management for Folio.
//!
//! `folio.toml` is looked up in the working directory and its parents, parsed
//! with serde, and resolved against the directory it was found in. Command
//! line overrides are passed to [`Config::load`] as [`CliSettings`].
//!
//! ## Environment variables
//!
//! `github.api_url` and `github.token` may reference the environment:
//! `${VAR}` fails when `VAR` is unset, `${VAR:-default}` falls back to
//! `default`.

mod expand;

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Command line overrides; `None` keeps the file value.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override blog source directory.
    pub source_dir: Option<PathBuf>,
    /// Override blog output directory.
    pub output_dir: Option<PathBuf>,
    /// Override portfolio output file.
    pub portfolio_output: Option<PathBuf>,
    /// Override GitHub API token.
    pub github_token: Option<String>,
}

/// File name looked up during discovery.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default number of characters in an index page summary.
const DEFAULT_SUMMARY_LENGTH: usize = 256;

/// Default number of characters in a page meta description.
const DEFAULT_META_DESCRIPTION_LENGTH: usize = 500;

/// Loaded `folio.toml`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide presentation settings.
    pub site: SiteConfig,
    /// Blog configuration (paths are relative strings from TOML).
    blog: BlogConfigRaw,
    /// Portfolio configuration (paths are relative strings from TOML).
    portfolio: PortfolioConfigRaw,
    /// GitHub API configuration.
    pub github: GitHubConfig,

    /// Resolved blog configuration (set after loading).
    #[serde(skip)]
    pub blog_resolved: BlogConfig,
    /// Resolved portfolio configuration (set after loading).
    #[serde(skip)]
    pub portfolio_resolved: PortfolioConfig,
    /// Where the configuration was read from, if a file was found.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide presentation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in page headers and the `<title>` element.
    pub title: String,
    /// Stylesheet href linked from every generated page.
    pub stylesheet: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_owned(),
            stylesheet: "styles.css".to_owned(),
        }
    }
}

/// Raw blog configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BlogConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    summary_length: Option<usize>,
    meta_description_length: Option<usize>,
}

/// Resolved blog configuration with absolute paths.
#[derive(Debug)]
pub struct BlogConfig {
    /// Directory containing markdown posts.
    pub source_dir: PathBuf,
    /// Directory the generated pages are written to.
    pub output_dir: PathBuf,
    /// Character budget for index page summaries.
    pub summary_length: usize,
    /// Character budget for `<meta name="description">`.
    pub meta_description_length: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("posts"),
            output_dir: PathBuf::from("blog"),
            summary_length: DEFAULT_SUMMARY_LENGTH,
            meta_description_length: DEFAULT_META_DESCRIPTION_LENGTH,
        }
    }
}

/// Raw portfolio configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PortfolioConfigRaw {
    output: Option<String>,
    accounts: Vec<String>,
    hidden: Vec<String>,
    min_stars: Option<u64>,
    branch: Option<String>,
    placeholder: Option<String>,
    star_offsets: HashMap<String, i64>,
}

/// Resolved portfolio configuration.
#[derive(Debug)]
pub struct PortfolioConfig {
    /// Generated portfolio page.
    pub output: PathBuf,
    /// GitHub users or organizations whose repositories are listed.
    pub accounts: Vec<String>,
    /// Repository names never listed.
    pub hidden: Vec<String>,
    /// Repositories with fewer stars are left out.
    pub min_stars: u64,
    /// Branch used to resolve relative README image paths.
    pub branch: String,
    /// Thumbnail used when a README has no image.
    pub placeholder: String,
    /// Per-repository adjustments applied to the star count when sorting.
    pub star_offsets: HashMap<String, i64>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("portfolio.html"),
            accounts: Vec::new(),
            hidden: Vec::new(),
            min_stars: 2,
            branch: "main".to_owned(),
            placeholder: "placeholder.jpg".to_owned(),
            star_offsets: HashMap::new(),
        }
    }
}

/// GitHub API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Personal access token sent as a bearer token.
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_owned(),
            token: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`github.token`").
        field: String,
        /// Error message (e.g., "${`GITHUB_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a length budget to be positive.
fn require_positive(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load `config_path`, or the discovered `folio.toml`, or the defaults.
    ///
    /// Relative paths resolve against the config file's directory. CLI
    /// settings are applied last and win over file values.
    ///
    /// # Errors
    ///
    /// Fails when an explicit `config_path` is missing, or the file does not
    /// parse, expand or validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.blog_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.blog_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(output) = &settings.portfolio_output {
            self.portfolio_resolved.output.clone_from(output);
        }
        if let Some(token) = &settings.github_token {
            self.github.token = Some(token.clone());
        }
    }

    /// Get validated portfolio configuration.
    ///
    /// Use this instead of accessing `portfolio_resolved` directly when the
    /// command needs at least one account to list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no accounts are configured.
    pub fn require_portfolio(&self) -> Result<&PortfolioConfig, ConfigError> {
        if self.portfolio_resolved.accounts.is_empty() {
            return Err(ConfigError::Validation(
                "portfolio.accounts must list at least one GitHub account".into(),
            ));
        }
        Ok(&self.portfolio_resolved)
    }

    /// Walk up from the working directory looking for `folio.toml`.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Defaults with paths under `base`.
    fn default_with_base(base: &Path) -> Self {
        let blog = BlogConfig::default();
        let portfolio = PortfolioConfig::default();
        Self {
            site: SiteConfig::default(),
            blog: BlogConfigRaw::default(),
            portfolio: PortfolioConfigRaw::default(),
            github: GitHubConfig::default(),
            blog_resolved: BlogConfig {
                source_dir: base.join(blog.source_dir),
                output_dir: base.join(blog.output_dir),
                ..blog
            },
            portfolio_resolved: PortfolioConfig {
                output: base.join(&portfolio.output),
                ..portfolio
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check field values. Errors name the offending field.
    ///
    /// Runs automatically when loading from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.validate_blog()?;
        self.validate_portfolio()?;
        require_non_empty(&self.github.api_url, "github.api_url")?;
        require_http_url(&self.github.api_url, "github.api_url")?;
        Ok(())
    }

    fn validate_blog(&self) -> Result<(), ConfigError> {
        require_positive(self.blog_resolved.summary_length, "blog.summary_length")?;
        require_positive(
            self.blog_resolved.meta_description_length,
            "blog.meta_description_length",
        )?;
        Ok(())
    }

    fn validate_portfolio(&self) -> Result<(), ConfigError> {
        let portfolio = &self.portfolio_resolved;
        require_non_empty(&portfolio.branch, "portfolio.branch")?;
        require_non_empty(&portfolio.placeholder, "portfolio.placeholder")?;
        if let Some(account) = portfolio.accounts.iter().find(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "portfolio.accounts contains an empty name: {account:?}"
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.github.api_url = expand::expand_env(&self.github.api_url, "github.api_url")?;

        // An empty expansion (`${GITHUB_TOKEN:-}`) means no token.
        if let Some(ref token) = self.github.token {
            let token = expand::expand_env(token, "github.token")?;
            self.github.token = Some(token).filter(|t| !t.is_empty());
        }

        Ok(())
    }

    /// Fill the resolved sections, joining relative paths onto `config_dir`.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.blog_resolved = BlogConfig {
            source_dir: resolve(self.blog.source_dir.as_deref(), "posts"),
            output_dir: resolve(self.blog.output_dir.as_deref(), "blog"),
            summary_length: self.blog.summary_length.unwrap_or(DEFAULT_SUMMARY_LENGTH),
            meta_description_length: self
                .blog
                .meta_description_length
                .unwrap_or(DEFAULT_META_DESCRIPTION_LENGTH),
        };

        let defaults = PortfolioConfig::default();
        let portfolio = std::mem::take(&mut self.portfolio);
        self.portfolio_resolved = PortfolioConfig {
            output: resolve(portfolio.output.as_deref(), "portfolio.html"),
            accounts: portfolio.accounts,
            hidden: portfolio.hidden,
            min_stars: portfolio.min_stars.unwrap_or(defaults.min_stars),
            branch: portfolio.branch.unwrap_or(defaults.branch),
            placeholder: portfolio.placeholder.unwrap_or(defaults.placeholder),
            star_offsets: portfolio.star_offsets,
        };
    }
}
