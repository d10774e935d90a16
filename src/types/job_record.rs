// src/types/job_record.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Separator between the three identity fields. Not escaped.
pub const KEY_DELIMITER: &str = "|";

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_INTERVAL: &str = "yearly";

/// Column order shared by the spreadsheet rows and the CSV backup.
/// The first three columns are the identity fields.
pub const COLUMNS: [&str; 14] = [
    "title",
    "company",
    "location",
    "job_url_direct",
    "job_board_url",
    "site",
    "job_type",
    "is_remote",
    "min_amount",
    "max_amount",
    "currency",
    "interval",
    "description",
    "date_posted",
];

#[derive(Debug, Clone, PartialEq)]
pub enum JobType {
    Single(String),
    Many(Vec<String>),
}

impl JobType {
    fn parts(&self) -> Vec<&str> {
        match self {
            JobType::Single(value) => vec![value.as_str()],
            JobType::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Plain form used in tabular output ("fulltime, contract").
    pub fn joined(&self) -> String {
        self.parts().join(", ")
    }

    /// Display form used in the feed ("Fulltime, Contract").
    pub fn title_case(&self) -> String {
        self.parts()
            .into_iter()
            .map(crate::utils::title_case)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_url_direct: Option<String>,
    pub job_board_url: Option<String>,
    pub site: Option<String>,
    pub job_type: Option<JobType>,
    pub is_remote: Option<bool>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub currency: String,
    pub interval: String,
    pub description: Option<String>,
    pub date_posted: Option<NaiveDate>,
}

impl JobRecord {
    pub fn new(title: &str, company: &str, location: &str) -> Self {
        Self {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            job_url_direct: None,
            job_board_url: None,
            site: None,
            job_type: None,
            is_remote: None,
            min_amount: None,
            max_amount: None,
            currency: DEFAULT_CURRENCY.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            description: None,
            date_posted: None,
        }
    }

    /// Composite key used to detect duplicate postings.
    pub fn identity_key(&self) -> String {
        identity_key(&self.title, &self.company, &self.location)
    }

    /// Build a record from a loosely typed row returned by the scrape service.
    ///
    /// Nulls, NaN markers and unparsable values all become `None`. The board
    /// link is read from `job_board_url`, falling back to the service's
    /// `job_url` column. Identity fields are kept as given.
    pub fn from_json_row(row: &Map<String, Value>) -> Self {
        let text = |name: &str| row.get(name).and_then(json_text);
        let identity = |name: &str| row.get(name).and_then(json_literal).unwrap_or_default();

        let job_type = match row.get("job_type") {
            Some(Value::Array(items)) => {
                let values: Vec<String> = items.iter().filter_map(json_text).collect();
                if values.is_empty() {
                    None
                } else {
                    Some(JobType::Many(values))
                }
            }
            Some(other) => json_text(other).map(JobType::Single),
            None => None,
        };

        Self {
            title: identity("title"),
            company: identity("company"),
            location: identity("location"),
            job_url_direct: text("job_url_direct"),
            job_board_url: text("job_board_url").or_else(|| text("job_url")),
            site: text("site"),
            job_type,
            is_remote: row.get("is_remote").and_then(json_bool),
            min_amount: row.get("min_amount").and_then(json_number),
            max_amount: row.get("max_amount").and_then(json_number),
            currency: text("currency").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            interval: text("interval").unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
            description: text("description"),
            date_posted: row.get("date_posted").and_then(parse_posted_date),
        }
    }

    /// Build a record from named text cells (CSV backup rows).
    pub fn from_text_fields<'a, F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let text = |name: &str| {
            get(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            title: text("title").unwrap_or_default(),
            company: text("company").unwrap_or_default(),
            location: text("location").unwrap_or_default(),
            job_url_direct: text("job_url_direct"),
            job_board_url: text("job_board_url").or_else(|| text("job_url")),
            site: text("site"),
            job_type: text("job_type").map(JobType::Single),
            is_remote: text("is_remote").and_then(|value| parse_bool(&value)),
            min_amount: text("min_amount").and_then(|value| value.parse::<f64>().ok()),
            max_amount: text("max_amount").and_then(|value| value.parse::<f64>().ok()),
            currency: text("currency").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            interval: text("interval").unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
            description: text("description"),
            date_posted: text("date_posted").and_then(|value| parse_date_str(&value)),
        }
    }

    /// All fields as strings, in `COLUMNS` order. Missing values are empty,
    /// dates are `YYYY-MM-DD`.
    pub fn to_cells(&self) -> Vec<String> {
        let opt = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            opt(&self.job_url_direct),
            opt(&self.job_board_url),
            opt(&self.site),
            self.job_type
                .as_ref()
                .map(JobType::joined)
                .unwrap_or_default(),
            self.is_remote.map(|v| v.to_string()).unwrap_or_default(),
            self.min_amount.map(format_amount).unwrap_or_default(),
            self.max_amount.map(format_amount).unwrap_or_default(),
            self.currency.clone(),
            self.interval.clone(),
            opt(&self.description),
            self.date_posted
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ]
    }
}

pub fn identity_key(title: &str, company: &str, location: &str) -> String {
    [title, company, location].join(KEY_DELIMITER)
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

// Pandas leaks missing values into string columns as "NaN" or "null".
fn is_missing_marker(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan") || value.eq_ignore_ascii_case("null")
}

fn json_literal(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_text(value: &Value) -> Option<String> {
    json_literal(value).filter(|text| !is_missing_marker(text))
}

fn json_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool(s),
        Value::Number(n) => n.as_i64().and_then(|n| match n {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }),
        _ => None,
    }
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Normalize a posting date from the scrape service. Accepts ISO dates,
/// ISO/RFC 3339 datetimes and epoch timestamps (seconds or milliseconds).
pub fn parse_posted_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let raw = n.as_i64()?;
            // Pandas serializes datetimes as epoch milliseconds.
            let seconds = if raw.abs() >= 100_000_000_000 {
                raw / 1000
            } else {
                raw
            };
            DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}
