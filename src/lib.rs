//! Job posting sync: scrape a role, drop postings already recorded in the
//! shared spreadsheet, append the rest, keep a CSV backup and render an RSS feed.

pub mod cli;
pub mod core;
pub mod feed;
pub mod pipeline;
pub mod scraper;
pub mod sheets;
pub mod sinks;
pub mod sync;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use pipeline::{JobSearch, SearchOptions, SyncReport};
pub use types::{DateFilterOption, JobRecord};

/// Application log line at the given `tracing` level.
///
/// ```ignore
/// app_log!(info, "Found {} existing rows", rows.len());
/// ```
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}
