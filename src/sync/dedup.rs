// src/sync/dedup.rs
use super::ExistingKeySet;
use crate::types::JobRecord;

/// Records whose identity key is not already recorded, in input order.
/// Duplicates within the batch itself are not collapsed.
pub fn new_jobs(filtered: Vec<JobRecord>, existing: &ExistingKeySet) -> Vec<JobRecord> {
    filtered
        .into_iter()
        .filter(|job| !existing.contains(&job.identity_key()))
        .collect()
}
