// src/core/fs_ops.rs
//! File system operations for the results directory

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

use crate::app_log;
use crate::types::DateFilterOption;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(info, "Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Write bytes, creating the parent directory first
    pub async fn write_file_safe(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        app_log!(debug, "Written file: {}", path.display());
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// `{role}_jobs_[{filter}_]{YYYYMMDD}.csv`
    pub fn backup_file_name(
        role: &str,
        filter: Option<DateFilterOption>,
        date: NaiveDate,
    ) -> String {
        format!(
            "{}{}.csv",
            Self::backup_file_prefix(role, filter),
            date.format("%Y%m%d")
        )
    }

    /// Everything before the date stamp in a backup file name.
    pub fn backup_file_prefix(role: &str, filter: Option<DateFilterOption>) -> String {
        let role = crate::utils::normalize_role_name(role);
        match filter {
            Some(filter) => format!("{}_jobs_{}_", role, filter),
            None => format!("{}_jobs_", role),
        }
    }

    /// Most recently created file in `dir` named `{prefix}*{suffix}`.
    /// Falls back to modification time where creation time is unavailable.
    pub async fn latest_matching_file(
        dir: &Path,
        prefix: &str,
        suffix: &str,
    ) -> Result<Option<PathBuf>> {
        if !dir.exists() {
            return Ok(None);
        }

        let mut entries = fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut latest: Option<(SystemTime, PathBuf)> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|name| name.starts_with(prefix) && name.ends_with(suffix))
                .unwrap_or(false);
            if !matches || !path.is_file() {
                continue;
            }

            let metadata = entry.metadata().await?;
            let stamp = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);

            let newer = match &latest {
                Some((best, best_path)) => (stamp, &path) > (*best, best_path),
                None => true,
            };
            if newer {
                latest = Some((stamp, path));
            }
        }

        Ok(latest.map(|(_, path)| path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("jobfeed-fs-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            FsOps::backup_file_name("pharmacist", None, date),
            "pharmacist_jobs_20261017.csv"
        );
        assert_eq!(
            FsOps::backup_file_name("Nurse", Some(DateFilterOption::Today), date),
            "nurse_jobs_today_20261017.csv"
        );
    }

    #[tokio::test]
    async fn test_latest_matching_file_picks_newest_match() {
        let dir = temp_dir();
        FsOps::ensure_dir_exists(&dir).await.unwrap();

        let older = dir.join("nurse_jobs_today_20261015.csv");
        let other = dir.join("pharmacist_jobs_today_20261016.csv");
        let newer = dir.join("nurse_jobs_today_20261016.csv");

        FsOps::write_file_safe(&older, b"title\n").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        FsOps::write_file_safe(&other, b"title\n").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        FsOps::write_file_safe(&newer, b"title\n").await.unwrap();

        let found = FsOps::latest_matching_file(&dir, "nurse_jobs_today_", ".csv")
            .await
            .unwrap();
        assert_eq!(found, Some(newer));

        let none = FsOps::latest_matching_file(&dir, "doctor_jobs_", ".csv")
            .await
            .unwrap();
        assert_eq!(none, None);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_latest_matching_file_missing_dir() {
        let found = FsOps::latest_matching_file(&temp_dir(), "x", ".csv")
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
