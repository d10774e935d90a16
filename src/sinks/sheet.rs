// src/sinks/sheet.rs
use crate::app_log;
use crate::sheets::{SheetStore, SheetsError};
use crate::types::{JobRecord, COLUMNS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    Appended { rows: u64 },
    NothingToAppend,
    Unavailable,
    Failed(String),
}

/// Header row followed by one text row per record.
pub fn sheet_rows(jobs: &[JobRecord]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(jobs.len() + 1);
    rows.push(COLUMNS.iter().map(|c| c.to_string()).collect());
    rows.extend(jobs.iter().map(JobRecord::to_cells));
    rows
}

/// Append new jobs to the spreadsheet. Best effort: failures are logged and
/// reported in the outcome, never returned as errors.
pub async fn append_new_jobs(store: Option<&dyn SheetStore>, jobs: &[JobRecord]) -> SheetOutcome {
    let Some(store) = store else {
        app_log!(warn, "Spreadsheet unavailable, skipping sheet update");
        return SheetOutcome::Unavailable;
    };

    if jobs.is_empty() {
        app_log!(info, "No new jobs to add to Google Sheet");
        return SheetOutcome::NothingToAppend;
    }

    match try_append(store, jobs).await {
        Ok(rows) => {
            app_log!(info, "Successfully added {} new jobs to Google Sheet", rows);
            SheetOutcome::Appended { rows }
        }
        Err(e) => {
            app_log!(error, "Error updating Google Sheet: {}", e);
            SheetOutcome::Failed(e.to_string())
        }
    }
}

async fn try_append(store: &dyn SheetStore, jobs: &[JobRecord]) -> Result<u64, SheetsError> {
    let rows = sheet_rows(jobs);
    app_log!(
        info,
        "Attempting to append {} new jobs to Google Sheet",
        rows.len() - 1
    );

    // A missing sheet is created once; any other probe failure aborts the append.
    match store.read_rows().await {
        Ok(_) => {}
        Err(e) if e.is_not_found() => {
            app_log!(warn, "Sheet not found, creating it before appending");
            store.add_sheet().await?;
        }
        Err(e) => return Err(e),
    }

    store.append_rows(&rows).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        probe_status: Option<u16>,
        append_status: Option<u16>,
        added_sheets: Mutex<usize>,
        appended: Mutex<Vec<Vec<String>>>,
    }

    fn api_error(status: u16) -> SheetsError {
        SheetsError::Api {
            status,
            message: format!("status {}", status),
        }
    }

    #[async_trait]
    impl SheetStore for RecordingStore {
        async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
            match self.probe_status {
                Some(status) => Err(api_error(status)),
                None => Ok(vec![]),
            }
        }

        async fn add_sheet(&self) -> Result<()> {
            *self.added_sheets.lock().unwrap() += 1;
            Ok(())
        }

        async fn append_rows(&self, rows: &[Vec<String>]) -> Result<u64> {
            if let Some(status) = self.append_status {
                return Err(api_error(status));
            }
            self.appended.lock().unwrap().extend(rows.iter().cloned());
            Ok(rows.len() as u64)
        }
    }

    fn jobs() -> Vec<JobRecord> {
        vec![
            JobRecord::new("RN", "Acme", "NY"),
            JobRecord::new("LPN", "Beta", "TX"),
        ]
    }

    #[test]
    fn test_sheet_rows_header_then_records() {
        let rows = sheet_rows(&jobs());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "title");
        assert_eq!(rows[0].len(), COLUMNS.len());
        assert_eq!(&rows[1][..3], &["RN", "Acme", "NY"]);
    }

    #[tokio::test]
    async fn test_append_writes_header_and_rows() {
        let store = RecordingStore::default();
        let outcome = append_new_jobs(Some(&store), &jobs()).await;
        assert_eq!(outcome, SheetOutcome::Appended { rows: 3 });
        assert_eq!(store.appended.lock().unwrap().len(), 3);
        assert_eq!(*store.added_sheets.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_creates_missing_sheet_once() {
        let store = RecordingStore {
            probe_status: Some(404),
            ..Default::default()
        };
        let outcome = append_new_jobs(Some(&store), &jobs()).await;
        assert!(matches!(outcome, SheetOutcome::Appended { .. }));
        assert_eq!(*store.added_sheets.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_other_probe_error_aborts() {
        let store = RecordingStore {
            probe_status: Some(403),
            ..Default::default()
        };
        let outcome = append_new_jobs(Some(&store), &jobs()).await;
        assert!(matches!(outcome, SheetOutcome::Failed(_)));
        assert!(store.appended.lock().unwrap().is_empty());
        assert_eq!(*store.added_sheets.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_failure_is_reported_not_raised() {
        let store = RecordingStore {
            append_status: Some(500),
            ..Default::default()
        };
        let outcome = append_new_jobs(Some(&store), &jobs()).await;
        assert!(matches!(outcome, SheetOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_append_skips_empty_batch_and_missing_store() {
        let store = RecordingStore::default();
        assert_eq!(
            append_new_jobs(Some(&store), &[]).await,
            SheetOutcome::NothingToAppend
        );
        assert_eq!(
            append_new_jobs(None, &jobs()).await,
            SheetOutcome::Unavailable
        );
    }
}
