//! `folio portfolio` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_github::GitHubClient;
use folio_site::PortfolioBuilder;
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the portfolio command.
#[derive(Args)]
pub(crate) struct PortfolioArgs {
    /// Output HTML file (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// GitHub API token (overrides config).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl PortfolioArgs {
    /// Execute the portfolio command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, no accounts are configured,
    /// or a repository listing cannot be fetched.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            portfolio_output: self.output,
            github_token: self.token.filter(|t| !t.is_empty()),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if config.github.token.is_none() {
            debug!("No GitHub token configured, using unauthenticated requests");
        }
        let portfolio = config.require_portfolio()?;

        output.field("Accounts", portfolio.accounts.join(", "));
        output.field("Output", portfolio.output.display());

        let client = GitHubClient::new(&config.github.api_url, config.github.token.clone());
        let count = PortfolioBuilder::new(&client, portfolio, &config.site).build()?;

        output.success(&format!(
            "Listed {count} repositories in {}",
            portfolio.output.display()
        ));
        Ok(())
    }
}
