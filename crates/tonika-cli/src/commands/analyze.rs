//! Single-text analysis command.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::ProgressBar;
use std::time::Duration;

use tonika_core::config::DEFAULT_API_URL;
use tonika_dashboard::{ApiClient, DashboardSession};

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze
    pub text: String,

    /// Base URL of the analysis API
    #[arg(long, env = "TONIKA_API_URL", default_value = DEFAULT_API_URL)]
    pub api: String,

    /// Print the raw JSON result
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let client = ApiClient::new(&args.api);
    let mut session = DashboardSession::new();

    let spinner = spinner("Analyzing...");
    let result = session.analyze_text(&client, &args.text).await;
    spinner.finish_and_clear();

    let result = result.with_context(|| format!("Analysis via {} failed", client.base_url()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_result(&result);
    }
    Ok(())
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
