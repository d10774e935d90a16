// src/core/config_manager.rs
//! Unified configuration management: environment variables plus an optional YAML file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A:Z";
const DEFAULT_CONFIG_FILE: &str = "jobfeed.yaml";
const DEFAULT_RESULTS_DIR: &str = "job_results";
const DEFAULT_JOBSPY_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub sheets: SheetsConfig,
    pub scraper: ScraperConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub name: String,
    pub results_dir: PathBuf,
}

/// Spreadsheet addressing and credentials. Both values may be absent; the
/// sheet-facing components degrade to no-ops in that case.
#[derive(Clone, Default)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    pub credentials_json: Option<String>,
    pub range: String,
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field(
                "credentials_json",
                &self.credentials_json.as_ref().map(|_| "<redacted>"),
            )
            .field("range", &self.range)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub api_url: String,
    pub sites: Vec<String>,
    pub results_wanted: u32,
    pub country: String,
    pub remote_only: bool,
    pub timeout_seconds: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_JOBSPY_URL.to_string(),
            sites: ["indeed", "linkedin", "zip_recruiter", "glassdoor", "google"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            results_wanted: 100,
            country: "USA".to_string(),
            remote_only: true,
            timeout_seconds: None,
        }
    }
}

/// RSS channel metadata. Unset titles are derived from the role at render time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: String,
    pub generator: Option<String>,
    pub language: String,
    pub category: String,
    pub generic_job_boards: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            link: "https://example.com/jobs".to_string(),
            generator: None,
            language: "en-us".to_string(),
            category: "Nursing Jobs".to_string(),
            generic_job_boards: ["indeed.com", "linkedin.com", "ziprecruiter.com", "glassdoor.com"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    results_dir: Option<PathBuf>,
    sheet_range: Option<String>,
    scraper: Option<ScraperConfig>,
    feed: Option<FeedConfig>,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("JOBFEED_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let file = Self::load_file(&config_path)?;

        let environment = Self::load_environment(file.results_dir.clone());
        let sheets = Self::load_sheets(file.sheet_range.clone());

        let mut scraper = file.scraper.unwrap_or_default();
        if let Ok(url) = std::env::var("JOBSPY_API_URL") {
            scraper.api_url = url;
        }

        Ok(Self {
            environment,
            sheets,
            scraper,
            feed: file.feed.unwrap_or_default(),
        })
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(file)
    }

    /// Load environment configuration
    fn load_environment(results_dir: Option<PathBuf>) -> EnvironmentConfig {
        let name = std::env::var("JOBFEED_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string());
        info!("Loading environment configuration for: {}", name);

        let results_dir = std::env::var("JOBFEED_RESULTS_DIR")
            .map(PathBuf::from)
            .ok()
            .or(results_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));

        EnvironmentConfig { name, results_dir }
    }

    fn load_sheets(range: Option<String>) -> SheetsConfig {
        let spreadsheet_id = non_empty_env("GOOGLE_SHEET_ID");
        let credentials_json = non_empty_env("GOOGLE_SHEETS_CREDENTIALS");

        if spreadsheet_id.is_none() {
            warn!("GOOGLE_SHEET_ID not set, spreadsheet sync disabled");
        }
        if credentials_json.is_none() {
            warn!("GOOGLE_SHEETS_CREDENTIALS not set, spreadsheet sync disabled");
        }

        SheetsConfig {
            spreadsheet_id,
            credentials_json,
            range: range.unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string()),
        }
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.environment.results_dir).await
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_partial_sections_use_defaults() {
        let yaml = r#"
results_dir: /var/lib/jobfeed
scraper:
  sites: [indeed, linkedin]
  results_wanted: 50
feed:
  link: https://jobs.example.org
  category: Pharmacy Jobs
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let scraper = file.scraper.unwrap();
        assert_eq!(scraper.sites, vec!["indeed", "linkedin"]);
        assert_eq!(scraper.results_wanted, 50);
        assert_eq!(scraper.country, "USA");
        assert!(scraper.remote_only);

        let feed = file.feed.unwrap();
        assert_eq!(feed.link, "https://jobs.example.org");
        assert_eq!(feed.category, "Pharmacy Jobs");
        assert_eq!(feed.language, "en-us");
        assert_eq!(file.results_dir, Some(PathBuf::from("/var/lib/jobfeed")));
        assert_eq!(file.sheet_range, None);
    }

    #[test]
    fn test_sheets_config_debug_redacts_credentials() {
        let config = SheetsConfig {
            spreadsheet_id: Some("sheet".into()),
            credentials_json: Some("{\"private_key\":\"secret\"}".into()),
            range: DEFAULT_SHEET_RANGE.into(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
