// src/sync/filters.rs
use chrono::NaiveDate;

use crate::app_log;
use crate::types::JobRecord;

/// Keep only remote postings.
///
/// The filter applies only when the batch carries remote information at all:
/// if any record has `is_remote` set, records that are not exactly
/// `Some(true)` are dropped. A batch with no `is_remote` values passes as is.
pub fn filter_remote(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    if !jobs.iter().any(|job| job.is_remote.is_some()) {
        return jobs;
    }

    let before = jobs.len();
    let remote: Vec<JobRecord> = jobs
        .into_iter()
        .filter(|job| job.is_remote == Some(true))
        .collect();

    debug_assert!(remote.iter().all(|job| job.is_remote != Some(false)));

    app_log!(
        info,
        "Remote filter kept {} of {} jobs",
        remote.len(),
        before
    );
    remote
}

/// Keep only records posted on `target`. Records without a usable date never match.
pub fn filter_posted_on(jobs: Vec<JobRecord>, target: NaiveDate) -> Vec<JobRecord> {
    let before = jobs.len();
    let kept: Vec<JobRecord> = jobs
        .into_iter()
        .filter(|job| job.date_posted == Some(target))
        .collect();

    app_log!(
        info,
        "Date filter ({}) kept {} of {} jobs",
        target,
        kept.len(),
        before
    );
    kept
}

/// Remote filter first, then the optional same-day filter.
pub fn apply_filters(
    jobs: Vec<JobRecord>,
    remote_only: bool,
    target_date: Option<NaiveDate>,
) -> Vec<JobRecord> {
    let jobs = if remote_only { filter_remote(jobs) } else { jobs };
    match target_date {
        Some(target) => filter_posted_on(jobs, target),
        None => jobs,
    }
}
