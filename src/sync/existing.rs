// src/sync/existing.rs
use std::collections::HashSet;

use crate::app_log;
use crate::sheets::SheetStore;
use crate::types::identity_key;

/// Whether the key set reflects the store or stands in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { rows: usize },
    Unavailable { reason: String },
}

/// Identity keys already recorded before this run. Rebuilt every run.
#[derive(Debug, Clone)]
pub struct ExistingKeySet {
    keys: HashSet<String>,
    status: LoadStatus,
}

impl ExistingKeySet {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            keys: HashSet::new(),
            status: LoadStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Keys from every row after the header. Rows with fewer than three cells
    /// are skipped.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let keys = rows
            .iter()
            .skip(1)
            .filter(|row| row.len() >= 3)
            .map(|row| identity_key(&row[0], &row[1], &row[2]))
            .collect();

        Self {
            keys,
            status: LoadStatus::Loaded { rows: rows.len() },
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// True when the store could not be read and the set is empty by default.
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, LoadStatus::Unavailable { .. })
    }
}

/// Read the existing-key set. Never fails: an unconfigured or unreachable
/// store yields an empty set marked unavailable, so every scraped record
/// will look new.
pub async fn load_existing_keys(store: Option<&dyn SheetStore>) -> ExistingKeySet {
    let Some(store) = store else {
        app_log!(
            error,
            "Spreadsheet unavailable, treating all scraped jobs as new"
        );
        return ExistingKeySet::unavailable("spreadsheet not configured");
    };

    match store.read_rows().await {
        Ok(rows) => {
            app_log!(info, "Found {} existing rows in Google Sheet", rows.len());
            ExistingKeySet::from_rows(&rows)
        }
        Err(e) => {
            app_log!(error, "Error getting existing jobs: {}", e);
            ExistingKeySet::unavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{Result, SheetsError};
    use async_trait::async_trait;

    struct FixedRows(Vec<Vec<String>>);

    #[async_trait]
    impl SheetStore for FixedRows {
        async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
            Ok(self.0.clone())
        }
        async fn add_sheet(&self) -> Result<()> {
            Ok(())
        }
        async fn append_rows(&self, rows: &[Vec<String>]) -> Result<u64> {
            Ok(rows.len() as u64)
        }
    }

    struct Unreachable;

    #[async_trait]
    impl SheetStore for Unreachable {
        async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
            Err(SheetsError::Api {
                status: 503,
                message: "backend unavailable".into(),
            })
        }
        async fn add_sheet(&self) -> Result<()> {
            unreachable!()
        }
        async fn append_rows(&self, _rows: &[Vec<String>]) -> Result<u64> {
            unreachable!()
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_from_rows_skips_header_and_short_rows() {
        let rows = vec![
            row(&["title", "company", "location", "job_url_direct"]),
            row(&["RN", "Acme", "NY", "https://acme.com/1"]),
            row(&["LPN", "Beta"]),
            row(&["CNA", "Gamma", "TX"]),
        ];
        let set = ExistingKeySet::from_rows(&rows);
        assert_eq!(set.len(), 2);
        assert!(set.contains("RN|Acme|NY"));
        assert!(set.contains("CNA|Gamma|TX"));
        assert!(!set.contains("title|company|location"));
        assert_eq!(set.status(), &LoadStatus::Loaded { rows: 4 });
    }

    #[test]
    fn test_from_rows_empty_sheet() {
        let set = ExistingKeySet::from_rows(&[]);
        assert!(set.is_empty());
        assert!(!set.is_degraded());
    }

    #[tokio::test]
    async fn test_load_existing_keys_reads_store() {
        let store = FixedRows(vec![
            row(&["title", "company", "location"]),
            row(&["RN", "Acme", "NY"]),
        ]);
        let set = load_existing_keys(Some(&store)).await;
        assert!(set.contains("RN|Acme|NY"));
        assert!(!set.is_degraded());
    }

    #[tokio::test]
    async fn test_load_existing_keys_unreachable_store_is_empty() {
        let set = load_existing_keys(Some(&Unreachable)).await;
        assert!(set.is_empty());
        assert!(set.is_degraded());
    }

    #[tokio::test]
    async fn test_load_existing_keys_without_store_is_empty() {
        let set = load_existing_keys(None).await;
        assert!(set.is_empty());
        assert!(set.is_degraded());
    }
}
