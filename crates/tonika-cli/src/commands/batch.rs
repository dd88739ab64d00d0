//! Spreadsheet analysis command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use tonika_core::config::DEFAULT_API_URL;
use tonika_core::Sentiment;
use tonika_dashboard::{ApiClient, DashboardSession};

use super::analyze::spinner;
use crate::output;

#[derive(Args)]
pub struct BatchArgs {
    /// Spreadsheet with MessageText, UserSenderId and SubmitDate columns
    pub file: PathBuf,

    /// Show only rows whose text contains this keyword
    #[arg(long, short)]
    pub keyword: Option<String>,

    /// Show only rows of this class (bad, neutral, good, unknown)
    #[arg(long)]
    pub class: Option<Sentiment>,

    /// Base URL of the analysis API
    #[arg(long, env = "TONIKA_API_URL", default_value = DEFAULT_API_URL)]
    pub api: String,

    /// Skip the charts
    #[arg(long)]
    pub table_only: bool,
}

pub async fn execute(args: BatchArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.xlsx".to_string());

    let client = ApiClient::new(&args.api);
    let mut session = DashboardSession::new();

    let spinner = spinner("Analyzing spreadsheet...");
    let loaded = session.analyze_file(&client, &file_name, bytes).await;
    spinner.finish_and_clear();
    loaded.with_context(|| format!("Batch analysis of {} failed", file_name))?;

    if let Some(keyword) = &args.keyword {
        session.set_keyword(keyword);
    }
    session.set_sentiment_filter(args.class);

    output::print_rows_table(&session.filtered_rows(), session.filters());
    if !args.table_only {
        if let Some(views) = session.views() {
            output::print_views(&views);
        }
    }
    Ok(())
}
