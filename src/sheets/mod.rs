// src/sheets/mod.rs
//! Spreadsheet collaborator: Google Sheets v4 over REST

use async_trait::async_trait;
use thiserror::Error;

pub mod auth;
pub mod client;

pub use auth::{ServiceAccountAuth, ServiceAccountKey};
pub use client::SheetsClient;

pub type Result<T> = std::result::Result<T, SheetsError>;

#[derive(Debug, Error)]
pub enum SheetsError {
    /// Missing spreadsheet id or credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed credentials, signing or token exchange failure
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the Sheets API
    #[error("Sheets API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl SheetsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SheetsError::Api { status: 404, .. })
    }
}

/// Tabular store holding every previously recorded job row.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All rows of the configured range, header included, as text cells.
    async fn read_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Create the sheet the configured range points at.
    async fn add_sheet(&self) -> Result<()>;

    /// Append rows after existing content. Returns the updated row count.
    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<u64>;
}
