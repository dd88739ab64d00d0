//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tonika_core::Settings;

pub mod analyze;
pub mod batch;
pub mod check;
pub mod dashboard;
pub mod serve;

/// Tonika - text sentiment analysis service
#[derive(Parser)]
#[command(name = "tonika")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file for `serve` and `check` (defaults to ./tonika.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the analysis API server
    Serve(serve::ServeArgs),

    /// Analyze a single text through the API
    Analyze(analyze::AnalyzeArgs),

    /// Analyze a spreadsheet through the API and show the results
    Batch(batch::BatchArgs),

    /// Interactive dashboard session
    Dashboard(dashboard::DashboardArgs),

    /// Check that the model server is up and serving the configured model
    Check,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.config;
        // Client commands only talk to the API and never read settings.
        let load_settings = || Settings::load(config.as_deref());

        match self.command {
            Commands::Serve(args) => serve::execute(args, load_settings()?).await,
            Commands::Check => check::execute(&load_settings()?).await,
            Commands::Analyze(args) => analyze::execute(args).await,
            Commands::Batch(args) => batch::execute(args).await,
            Commands::Dashboard(args) => dashboard::execute(args).await,
        }
    }
}
