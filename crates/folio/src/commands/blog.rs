//! `folio blog` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::BlogBuilder;
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the blog command.
#[derive(Args)]
pub(crate) struct BlogArgs {
    /// Directory containing markdown posts (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory for the generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BlogArgs {
    /// Execute the blog command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any post cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            debug!("Using configuration from {}", path.display());
        }

        output.field("Source", config.blog_resolved.source_dir.display());
        output.field("Output", config.blog_resolved.output_dir.display());

        let summary = BlogBuilder::from_config(&config).build()?;

        output.success(&format!(
            "Built {} posts, index at {}",
            summary.posts.len(),
            summary.index_path.display()
        ));
        Ok(())
    }
}
