// src/sinks/mod.rs
//! Destinations for new jobs: the shared spreadsheet and the local CSV backup

pub mod backup;
pub mod sheet;

pub use backup::{to_csv_bytes, write_backup};
pub use sheet::{append_new_jobs, sheet_rows, SheetOutcome};
