// src/sheets/client.rs
use async_trait::async_trait;
use serde_json::Value;

use super::{Result, ServiceAccountAuth, ServiceAccountKey, SheetStore, SheetsError};
use crate::app_log;
use crate::core::SheetsConfig;
use crate::types::response::{AppendBody, AppendResponse, ValueRange};

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// REST calls against one spreadsheet range, given an access token.
struct SheetsApi {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
}

impl SheetsApi {
    fn values_url(&self) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&self.range)
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_rows(&self, token: &str) -> Result<Vec<Vec<String>>> {
        app_log!(
            info,
            "Reading range {} from spreadsheet {}",
            self.range,
            self.spreadsheet_id
        );

        let response = self
            .client
            .get(self.values_url())
            .bearer_auth(token)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        Ok(range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn add_sheet(&self, token: &str) -> Result<()> {
        let title = SheetsClient::sheet_title(&self.range);
        let url = format!("{}/{}:batchUpdate", self.base_url, self.spreadsheet_id);

        let body = serde_json::json!({
            "requests": [{
                "addSheet": {
                    "properties": { "title": title }
                }
            }]
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;

        app_log!(info, "Created new sheet '{}'", title);
        Ok(())
    }

    async fn append_rows(&self, token: &str, rows: &[Vec<String>]) -> Result<u64> {
        let url = format!("{}:append", self.values_url());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&AppendBody { values: rows })
            .send()
            .await?;
        let response = Self::check(response).await?;

        let appended: AppendResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;
        Ok(appended.updates.updated_rows)
    }
}

pub struct SheetsClient {
    api: SheetsApi,
    auth: ServiceAccountAuth,
}

impl SheetsClient {
    /// Build a client from configuration. Fails when the spreadsheet id or the
    /// credentials are missing or unusable.
    pub fn from_config(config: &SheetsConfig) -> Result<Self> {
        let spreadsheet_id = config
            .spreadsheet_id
            .clone()
            .ok_or_else(|| SheetsError::Config("No spreadsheet ID configured".into()))?;
        let credentials = config.credentials_json.as_deref().ok_or_else(|| {
            SheetsError::Config("No Google Sheets credentials configured".into())
        })?;

        let key = ServiceAccountKey::from_json(credentials)?;
        let client = reqwest::Client::new();
        let auth = ServiceAccountAuth::new(key, client.clone())?;

        app_log!(info, "Successfully created Google Sheets client");
        Ok(Self {
            api: SheetsApi {
                client,
                base_url: BASE_URL.to_string(),
                spreadsheet_id,
                range: config.range.clone(),
            },
            auth,
        })
    }

    /// Sheet title part of an A1 range ("Sheet1!A:Z" -> "Sheet1").
    pub fn sheet_title(range: &str) -> &str {
        range
            .split_once('!')
            .map(|(title, _)| title)
            .unwrap_or(range)
            .trim_matches('\'')
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetStore for SheetsClient {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        let token = self.auth.access_token().await?;
        self.api.read_rows(&token).await
    }

    async fn add_sheet(&self) -> Result<()> {
        let token = self.auth.access_token().await?;
        self.api.add_sheet(&token).await
    }

    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<u64> {
        let token = self.auth.access_token().await?;
        self.api.append_rows(&token, rows).await
    }
}
