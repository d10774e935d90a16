// src/scraper/client.rs
//! HTTP client for a JobSpy-compatible search service

use async_trait::async_trait;
use std::time::Duration;

use super::{JobSource, Result, ScrapeError, SearchQuery};
use crate::app_log;
use crate::types::response::{ScrapeErrorResponse, ScrapeRequest, ScrapeResponse};
use crate::types::JobRecord;

const SEARCH_JOBS_ENDPOINT: &str = "/api/v1/search_jobs";

pub struct JobSpyClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobSpyClient {
    /// Create new client. No timeout unless one is configured.
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request_body(query: &SearchQuery) -> ScrapeRequest {
        ScrapeRequest {
            site_name: query.sites.clone(),
            search_term: query.search_term.clone(),
            is_remote: query.remote_only,
            results_wanted: query.results_wanted,
            hours_old: query.hours_old,
            country_indeed: query.country.clone(),
        }
    }

    fn parse_response(body: &str) -> Result<Vec<JobRecord>> {
        let response: ScrapeResponse = serde_json::from_str(body)
            .map_err(|e| ScrapeError::Parse(e.to_string()))?;

        if let Some(count) = response.count {
            if count != response.jobs.len() {
                app_log!(
                    warn,
                    "Scrape service reported {} jobs but returned {}",
                    count,
                    response.jobs.len()
                );
            }
        }

        Ok(response.jobs.iter().map(JobRecord::from_json_row).collect())
    }
}

#[async_trait]
impl JobSource for JobSpyClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let url = format!("{}{}", self.base_url, SEARCH_JOBS_ENDPOINT);

        app_log!(
            info,
            "Searching {:?} for '{}' (remote_only={}, hours_old={}, results_wanted={})",
            query.sites,
            query.search_term,
            query.remote_only,
            query.hours_old,
            query.results_wanted
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(query))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ScrapeErrorResponse>(&body) {
                Ok(error_response) => error_response.error,
                Err(_) => body,
            };
            app_log!(error, "Scrape service error {}: {}", status, message);
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let jobs = Self::parse_response(&body)?;
        app_log!(info, "Scraped {} total jobs", jobs.len());
        Ok(jobs)
    }
}
