// src/sinks/backup.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::FsOps;
use crate::types::{DateFilterOption, JobRecord, COLUMNS};

/// Serialize records as CSV: header always present, non-numeric fields
/// quoted, embedded quotes doubled.
pub fn to_csv_bytes(jobs: &[JobRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;
    for job in jobs {
        writer
            .write_record(job.to_cells())
            .with_context(|| format!("Failed to write CSV row for {}", job.identity_key()))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))
}

/// Write the local backup for this run and return its path.
pub async fn write_backup(
    results_dir: &Path,
    role: &str,
    filter: Option<DateFilterOption>,
    date: NaiveDate,
    jobs: &[JobRecord],
) -> Result<PathBuf> {
    FsOps::ensure_dir_exists(results_dir).await?;

    let path = results_dir.join(FsOps::backup_file_name(role, filter, date));
    let bytes = to_csv_bytes(jobs)?;
    FsOps::write_file_safe(&path, &bytes).await?;

    app_log!(info, "Results saved to {}", path.display());
    Ok(path)
}
