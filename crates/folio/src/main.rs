//! Folio CLI - blog and portfolio generator.
//!
//! Provides commands for:
//! - `blog`: Render markdown posts and the post index
//! - `portfolio`: Build the portfolio page from GitHub repositories

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BlogArgs, PortfolioArgs};
use output::Output;

/// Folio - blog and portfolio generator.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build blog posts and the post index.
    Blog(BlogArgs),
    /// Build the portfolio page from GitHub repositories.
    Portfolio(PortfolioArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Blog(args) => args.verbose,
        Commands::Portfolio(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Blog(args) => args.execute(),
        Commands::Portfolio(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "serve"]).is_err());
    }
}
