use anyhow::Result;
use clap::Parser;
use jobfeed::app_log;
use jobfeed::cli::{handle_command, Cli};
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Optional JSON log file alongside the console output
    let file_layer = match std::env::var("JOBFEED_LOG_FILE") {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(&path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path, e))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(false)
                    .boxed(),
            )
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    if let Err(e) = handle_command(cli).await {
        app_log!(error, "Error occurred: {:#}", e);
        return Err(e);
    }

    Ok(())
}
