//! Tonika CLI - sentiment analysis service and dashboard.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Initialize tracing with optional file logging.
///
/// Client commands log to stderr only so their stdout stays readable.
/// The returned guard must live until exit to flush the log file.
fn init_tracing(log_file: Option<&Path>, default_filter: &str) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if let Some(path) = log_file {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let _ = std::fs::create_dir_all(dir);
        let file_name = path.file_name().unwrap_or_else(|| OsStr::new("tonika.log"));

        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

        // Log to both stdout and file when --log is used
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(args.log_file.clone()),
        _ => None,
    };

    let default_filter = match (&cli.command, cli.verbose) {
        (_, true) => "tonika=debug,tonika_core=debug,tonika_web=debug,tonika_inference=debug,tonika_dashboard=debug,tower_http=debug",
        (Commands::Serve(_), false) => "tonika=info,tonika_core=info,tonika_web=debug,tonika_inference=info,tower_http=info",
        _ => "tonika=warn,tonika_dashboard=warn",
    };
    let _guard = init_tracing(log_file.as_deref(), default_filter);

    cli.execute().await
}
