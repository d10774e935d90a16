// src/pipeline.rs
//! One search pass: existing keys, scrape, filter, dedup, append, backup

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::Instrument;
use uuid::Uuid;

use crate::app_log;
use crate::core::ScraperConfig;
use crate::scraper::{JobSource, SearchQuery};
use crate::sheets::SheetStore;
use crate::sinks::{append_new_jobs, write_backup, SheetOutcome};
use crate::sync::{apply_filters, load_existing_keys, new_jobs};
use crate::types::DateFilterOption;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub role: String,
    pub date_filter: Option<DateFilterOption>,
    /// Upstream window when no named policy fixes one.
    pub hours_old: u32,
}

impl SearchOptions {
    pub fn upstream_hours(&self) -> u32 {
        self.date_filter
            .map(|filter| filter.upstream_hours(self.hours_old))
            .unwrap_or(self.hours_old)
    }
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub existing_keys: usize,
    pub existing_degraded: bool,
    pub scraped: usize,
    pub filtered: usize,
    pub new_jobs: usize,
    pub sheet: SheetOutcome,
    pub backup_path: PathBuf,
}

pub struct JobSearch<'a> {
    source: &'a dyn JobSource,
    store: Option<&'a dyn SheetStore>,
    scraper: &'a ScraperConfig,
    results_dir: &'a Path,
}

impl<'a> JobSearch<'a> {
    pub fn new(
        source: &'a dyn JobSource,
        store: Option<&'a dyn SheetStore>,
        scraper: &'a ScraperConfig,
        results_dir: &'a Path,
    ) -> Self {
        Self {
            source,
            store,
            scraper,
            results_dir,
        }
    }

    fn query(&self, options: &SearchOptions) -> SearchQuery {
        SearchQuery {
            sites: self.scraper.sites.clone(),
            search_term: options.role.clone(),
            remote_only: self.scraper.remote_only,
            results_wanted: self.scraper.results_wanted,
            hours_old: options.upstream_hours(),
            country: self.scraper.country.clone(),
        }
    }

    /// Run one pass. Scrape and backup failures abort the run; spreadsheet
    /// failures are logged and reported.
    pub async fn run(&self, options: &SearchOptions, today: NaiveDate) -> Result<SyncReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("search", %run_id, role = %options.role);
        self.run_inner(run_id, options, today).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        options: &SearchOptions,
        today: NaiveDate,
    ) -> Result<SyncReport> {
        let existing = load_existing_keys(self.store).await;
        app_log!(info, "Found {} existing jobs in Google Sheet", existing.len());
        if existing.is_degraded() {
            app_log!(
                warn,
                "Existing jobs could not be loaded ({:?}); duplicates may be re-added",
                existing.status()
            );
        }

        let scraped = self
            .source
            .search(&self.query(options))
            .await
            .context("Job scrape failed")?;
        let scraped_count = scraped.len();

        let target_date = options
            .date_filter
            .and_then(|filter| filter.target_date(today));
        let filtered = apply_filters(scraped, self.scraper.remote_only, target_date);
        let filtered_count = filtered.len();

        let fresh = new_jobs(filtered, &existing);
        app_log!(
            info,
            "Found {} new jobs after filtering duplicates",
            fresh.len()
        );

        let sheet = append_new_jobs(self.store, &fresh).await;

        let backup_path = write_backup(
            self.results_dir,
            &options.role,
            options.date_filter,
            today,
            &fresh,
        )
        .await
        .context("Failed to write local backup")?;

        Ok(SyncReport {
            run_id,
            existing_keys: existing.len(),
            existing_degraded: existing.is_degraded(),
            scraped: scraped_count,
            filtered: filtered_count,
            new_jobs: fresh.len(),
            sheet,
            backup_path,
        })
    }
}
