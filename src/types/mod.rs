// src/types/mod.rs
pub mod date_filter;
pub mod job_record;
pub mod response;

pub use date_filter::DateFilterOption;
pub use job_record::{identity_key, JobRecord, JobType, COLUMNS};
