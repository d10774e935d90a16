// src/scraper/mod.rs
//! Job-board aggregation collaborator

use async_trait::async_trait;
use thiserror::Error;

pub mod client;

pub use client::JobSpyClient;

use crate::types::JobRecord;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Scrape service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse scrape response: {0}")]
    Parse(String),
}

/// Parameters for one search across the configured boards.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub sites: Vec<String>,
    pub search_term: String,
    pub remote_only: bool,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub country: String,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Run one search. Errors propagate to the caller and abort the run.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>>;
}
