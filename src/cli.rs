// src/cli.rs
use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app_log;
use crate::core::ConfigManager;
use crate::feed::{default_output_path, generate_feed, FeedRequest};
use crate::pipeline::{JobSearch, SearchOptions};
use crate::scraper::JobSpyClient;
use crate::sheets::{SheetStore, SheetsClient};
use crate::sinks::SheetOutcome;
use crate::types::DateFilterOption;

#[derive(Parser)]
#[command(name = "jobfeed")]
#[command(about = "Sync new job postings to a spreadsheet and render an RSS feed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the results directory
    #[arg(long, global = true)]
    pub results_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape, dedup against the sheet, append new jobs and write a CSV backup
    Search {
        role: String,
        /// today, yesterday, last_24h, last_12h or custom_hours
        #[arg(long)]
        date_filter: Option<DateFilterOption>,
        /// Upstream window when no named filter fixes one
        #[arg(long, default_value_t = 24)]
        hours_old: u32,
    },
    /// Render the RSS feed from the latest CSV backup
    Feed {
        role: String,
        #[arg(long, default_value = "today")]
        date_filter: DateFilterOption,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut config = ConfigManager::load()?;
    if let Some(dir) = cli.results_dir {
        config.environment.results_dir = dir;
    }

    match cli.command {
        Command::Search {
            role,
            date_filter,
            hours_old,
        } => run_search(&config, role, date_filter, hours_old).await,

        Command::Feed {
            role,
            date_filter,
            output,
        } => {
            let output = output.unwrap_or_else(|| default_output_path(&role));
            let request = FeedRequest {
                results_dir: &config.environment.results_dir,
                role: &role,
                filter: Some(date_filter),
                output,
            };
            if let Some(summary) = generate_feed(request, &config.feed).await? {
                app_log!(info, "✅ XML Feed Generated Successfully!");
                app_log!(info, "📁 Feed saved as: {}", summary.output.display());
            }
            Ok(())
        }
    }
}

async fn run_search(
    config: &ConfigManager,
    role: String,
    date_filter: Option<DateFilterOption>,
    hours_old: u32,
) -> Result<()> {
    config.ensure_directories().await?;

    let source = JobSpyClient::new(&config.scraper.api_url, config.scraper.timeout_seconds)?;
    let sheets = match SheetsClient::from_config(&config.sheets) {
        Ok(client) => Some(client),
        Err(e) => {
            app_log!(error, "Error setting up Google Sheets client: {}", e);
            None
        }
    };
    let store = sheets.as_ref().map(|client| client as &dyn SheetStore);

    let options = SearchOptions {
        role,
        date_filter,
        hours_old,
    };
    let search = JobSearch::new(
        &source,
        store,
        &config.scraper,
        &config.environment.results_dir,
    );
    let report = search.run(&options, Local::now().date_naive()).await?;

    app_log!(info, "Run {} complete", report.run_id);
    app_log!(info, "  Scraped:      {}", report.scraped);
    app_log!(info, "  After filter: {}", report.filtered);
    app_log!(info, "  New:          {}", report.new_jobs);
    app_log!(info, "  Backup:       {}", report.backup_path.display());
    match &report.sheet {
        SheetOutcome::Appended { rows } => app_log!(info, "  Sheet:        {} rows appended", rows),
        SheetOutcome::NothingToAppend => app_log!(info, "  Sheet:        nothing to append"),
        SheetOutcome::Unavailable => app_log!(warn, "  Sheet:        unavailable"),
        SheetOutcome::Failed(e) => app_log!(error, "  Sheet:        failed ({})", e),
    }
    if report.existing_degraded {
        app_log!(
            warn,
            "Existing jobs were not loaded; this run may have appended duplicates"
        );
    }

    Ok(())
}
