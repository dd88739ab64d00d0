//! Model server check.

use anyhow::{bail, Result};
use colored::Colorize;

use tonika_core::Settings;
use tonika_inference::ClassifierClient;

pub async fn execute(settings: &Settings) -> Result<()> {
    let client = ClassifierClient::from_settings(&settings.model);
    println!("{} Checking {}", "→".blue().bold(), client.base_url().cyan());

    let info = match client.info().await {
        Ok(info) => info,
        Err(e) => bail!("Model server unavailable: {:#}", e),
    };

    println!("  {} {}", "Model".bold(), info.model_id);
    if let Some(version) = &info.version {
        println!("  {} {}", "Version".bold(), version);
    }

    if info.model_id == settings.model.model_id {
        println!("{} Model server ready", "✓".green().bold());
    } else {
        println!(
            "{} Server reports '{}', configured model is '{}'",
            "!".yellow().bold(),
            info.model_id,
            settings.model.model_id
        );
    }
    Ok(())
}
