// src/feed/mod.rs
//! RSS feed rendering from the most recent local backup

use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

pub mod reader;
pub mod renderer;

pub use reader::{parse_backup_csv, read_backup};
pub use renderer::{render_feed, ChannelInfo, FeedItem};

use crate::app_log;
use crate::core::{FeedConfig, FsOps};
use crate::types::DateFilterOption;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    pub source: PathBuf,
    pub output: PathBuf,
    pub total_jobs: usize,
    pub direct_urls: usize,
}

pub struct FeedRequest<'a> {
    pub results_dir: &'a Path,
    pub role: &'a str,
    pub filter: Option<DateFilterOption>,
    pub output: PathBuf,
}

/// Default output path: `{role}_jobs_feed.xml` in the working directory.
pub fn default_output_path(role: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}_jobs_feed.xml",
        crate::utils::normalize_role_name(role)
    ))
}

/// Render the feed from the newest matching backup. Returns `None` without
/// writing anything when no backup exists.
pub async fn generate_feed(request: FeedRequest<'_>, config: &FeedConfig) -> Result<Option<FeedSummary>> {
    let prefix = FsOps::backup_file_prefix(request.role, request.filter);
    let Some(source) = FsOps::latest_matching_file(request.results_dir, &prefix, ".csv").await?
    else {
        app_log!(
            error,
            "No {} job CSV files found in {}",
            request.role,
            request.results_dir.display()
        );
        return Ok(None);
    };
    app_log!(info, "Using latest CSV file: {}", source.display());

    let jobs = read_backup(&source).await?;
    app_log!(info, "Loaded {} jobs from {}", jobs.len(), source.display());
    if jobs.is_empty() {
        app_log!(warn, "No jobs found in CSV file, writing empty feed");
    }

    let channel = ChannelInfo::for_role(config, request.role);
    let xml = render_feed(&jobs, &channel, Utc::now())?;
    FsOps::write_file_safe(&request.output, &xml).await?;

    let direct_urls = jobs.iter().filter(|job| channel.has_direct_url(job)).count();
    app_log!(
        info,
        "RSS feed created: {} with {} jobs",
        request.output.display(),
        jobs.len()
    );
    app_log!(info, "📊 Total jobs: {}", jobs.len());
    app_log!(info, "🔗 Direct company URLs: {}", direct_urls);

    Ok(Some(FeedSummary {
        source,
        output: request.output,
        total_jobs: jobs.len(),
        direct_urls,
    }))
}
