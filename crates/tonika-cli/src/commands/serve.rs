//! API server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use tonika_core::{SentimentAnalyzer, Settings};
use tonika_inference::ClassifierClient;

#[derive(Args)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Inference server URL
    #[arg(long)]
    pub model_url: Option<String>,

    /// Model identifier reported by the service
    #[arg(long)]
    pub model_id: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (with --log)
    #[arg(long, default_value = "logs/tonika-serve.log")]
    pub log_file: PathBuf,
}

impl ServeArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(url) = &self.model_url {
            settings.model.url = url.clone();
        }
        if let Some(model_id) = &self.model_id {
            settings.model.model_id = model_id.clone();
        }
    }
}

pub async fn execute(args: ServeArgs, mut settings: Settings) -> Result<()> {
    args.apply(&mut settings);

    let client = ClassifierClient::from_settings(&settings.model);
    // The server starts anyway; requests fail with 500 until the model is up.
    if !client.health_check().await.unwrap_or(false) {
        warn!(url = %settings.model.url, "Model server is not reachable yet");
    }

    let analyzer = SentimentAnalyzer::new(Arc::new(client), settings.analysis.policy());
    let address = settings.bind_address();

    println!();
    println!("  {} {}", "Tonika".cyan().bold(), "Sentiment API".bold());
    println!();
    println!("  {}       http://{}", "API".green(), address);
    println!("  {}     {}", "Model".green(), settings.model.model_id);
    println!("  {} {}", "Inference".green(), settings.model.url);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    tonika_web::run_server(&settings, analyzer).await?;

    Ok(())
}
