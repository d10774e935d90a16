// src/sync/mod.rs
//! Deciding which scraped postings are new: filtering, existing keys, dedup

pub mod dedup;
pub mod existing;
pub mod filters;

pub use dedup::new_jobs;
pub use existing::{load_existing_keys, ExistingKeySet, LoadStatus};
pub use filters::{apply_filters, filter_posted_on, filter_remote};
