//! Interactive dashboard.
//!
//! Mirrors the web dashboard: analyze a text, upload a spreadsheet, filter
//! the result table and look at the charts. Errors are shown inline and the
//! session keeps its previous state.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Select};
use std::path::PathBuf;

use tonika_core::config::DEFAULT_API_URL;
use tonika_dashboard::{ApiClient, DashboardSession};

use super::analyze::spinner;
use crate::output;

#[derive(Args)]
pub struct DashboardArgs {
    /// Base URL of the analysis API
    #[arg(long, env = "TONIKA_API_URL", default_value = DEFAULT_API_URL)]
    pub api: String,
}

#[derive(Clone, Copy)]
enum Action {
    AnalyzeText,
    AnalyzeFile,
    KeywordFilter,
    ClassFilter,
    ShowResults,
    ClearFilters,
    Quit,
}

impl Action {
    const ALL: [Action; 7] = [
        Action::AnalyzeText,
        Action::AnalyzeFile,
        Action::KeywordFilter,
        Action::ClassFilter,
        Action::ShowResults,
        Action::ClearFilters,
        Action::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::AnalyzeText => "Analyze text",
            Action::AnalyzeFile => "Analyze spreadsheet",
            Action::KeywordFilter => "Filter by keyword",
            Action::ClassFilter => "Filter by class",
            Action::ShowResults => "Show results",
            Action::ClearFilters => "Clear filters",
            Action::Quit => "Quit",
        }
    }
}

pub async fn execute(args: DashboardArgs) -> Result<()> {
    let client = ApiClient::new(&args.api);
    let mut session = DashboardSession::new();
    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();

    println!();
    println!("  {} {}", "Tonika".cyan().bold(), "Dashboard".bold());
    println!("  {}  {}", "API".green(), client.base_url());
    println!();

    loop {
        let choice = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()
            .context("Failed to read action")?;

        match Action::ALL[choice] {
            Action::AnalyzeText => analyze_text(&client, &mut session).await?,
            Action::AnalyzeFile => analyze_file(&client, &mut session).await?,
            Action::KeywordFilter => {
                let keyword: String = Input::new()
                    .with_prompt("Keyword (empty clears)")
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read keyword")?;
                session.set_keyword(&keyword);
                show_table(&session);
            }
            Action::ClassFilter => {
                let classes = session.available_sentiments();
                if classes.is_empty() {
                    output::print_warning("Upload a spreadsheet first.");
                    continue;
                }
                let mut items = vec!["all".to_string()];
                items.extend(classes.iter().map(|s| s.to_string()));
                let picked = Select::new()
                    .with_prompt("Class")
                    .items(&items)
                    .default(0)
                    .interact()
                    .context("Failed to read class")?;
                session.set_sentiment_filter(picked.checked_sub(1).map(|i| classes[i]));
                show_table(&session);
            }
            Action::ShowResults => {
                if let Some(result) = session.last_result() {
                    println!();
                    output::print_result(result);
                }
                match session.views() {
                    Some(views) => {
                        println!();
                        show_table(&session);
                        output::print_views(&views);
                    }
                    None if session.last_result().is_none() => {
                        println!("{}", "Nothing analyzed yet.".dimmed());
                    }
                    None => {}
                }
            }
            Action::ClearFilters => {
                session.clear_filters();
                show_table(&session);
            }
            Action::Quit => break,
        }
        println!();
    }
    Ok(())
}

async fn analyze_text(client: &ApiClient, session: &mut DashboardSession) -> Result<()> {
    let text: String = Input::new()
        .with_prompt("Text")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read text")?;

    let spinner = spinner("Analyzing...");
    let result = session.analyze_text(client, &text).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => output::print_result(&result),
        Err(e) => output::print_warning(&e.to_string()),
    }
    Ok(())
}

async fn analyze_file(client: &ApiClient, session: &mut DashboardSession) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Spreadsheet path")
        .interact_text()
        .context("Failed to read path")?;
    let path = PathBuf::from(path.trim());

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            output::print_warning(&format!("Cannot read {}: {}", path.display(), e));
            return Ok(());
        }
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.xlsx".to_string());

    let spinner = spinner("Analyzing spreadsheet...");
    let loaded = session.analyze_file(client, &file_name, bytes).await;
    spinner.finish_and_clear();

    match loaded {
        Ok(count) => {
            println!("{} {} rows analyzed", "✓".green().bold(), count);
            show_table(session);
        }
        Err(e) => output::print_warning(&e.to_string()),
    }
    Ok(())
}

fn show_table(session: &DashboardSession) {
    if session.batch().is_none() {
        println!("{}", "No batch loaded.".dimmed());
        return;
    }
    output::print_rows_table(&session.filtered_rows(), session.filters());
}
