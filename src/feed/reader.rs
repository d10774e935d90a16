// src/feed/reader.rs
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::core::FsOps;
use crate::types::JobRecord;

/// Parse backup CSV text into records, matching columns by header name.
pub fn parse_backup_csv(content: &str) -> Result<Vec<JobRecord>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers: HashMap<String, usize> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect();

    let mut jobs = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV parsing error at row {}", line + 1))?;
        jobs.push(JobRecord::from_text_fields(|name| {
            headers.get(name).and_then(|idx| record.get(*idx))
        }));
    }

    Ok(jobs)
}

pub async fn read_backup(path: &Path) -> Result<Vec<JobRecord>> {
    let content = FsOps::read_file_safe(path).await?;
    parse_backup_csv(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::to_csv_bytes;

    #[test]
    fn test_parse_backup_csv_by_header_name() {
        let csv = "company,title,location,is_remote,min_amount\nAcme,RN,NY,True,80000.0\n";
        let jobs = parse_backup_csv(csv).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].identity_key(), "RN|Acme|NY");
        assert_eq!(jobs[0].is_remote, Some(true));
        assert_eq!(jobs[0].min_amount, Some(80000.0));
        assert_eq!(jobs[0].max_amount, None);
        assert_eq!(jobs[0].currency, "USD");
    }

    #[test]
    fn test_parse_backup_csv_header_only_and_empty() {
        let header_only = String::from_utf8(to_csv_bytes(&[]).unwrap()).unwrap();
        assert!(parse_backup_csv(&header_only).unwrap().is_empty());
        assert!(parse_backup_csv("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_backup_csv_reads_written_backup() {
        let mut record = JobRecord::new("RN", "Acme", "NY");
        record.job_url_direct = Some("https://acme.com/job1".into());
        record.is_remote = Some(true);
        record.min_amount = Some(80000.0);
        record.max_amount = Some(95000.0);

        let csv = String::from_utf8(to_csv_bytes(&[record.clone()]).unwrap()).unwrap();
        let jobs = parse_backup_csv(&csv).unwrap();
        assert_eq!(jobs, vec![record]);
    }
}
