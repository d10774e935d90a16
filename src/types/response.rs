use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ===== Scrape Service Types =====

/// Request body for the JobSpy-compatible search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRequest {
    pub site_name: Vec<String>,
    pub search_term: String,
    pub is_remote: bool,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub country_indeed: String,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub jobs: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeErrorResponse {
    #[serde(alias = "detail")]
    pub error: String,
}

// ===== Google Sheets Types =====

#[derive(Debug, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct AppendBody<'a> {
    pub values: &'a [Vec<String>],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    #[serde(default)]
    pub updates: AppendUpdates,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendUpdates {
    #[serde(default)]
    pub updated_rows: u64,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
