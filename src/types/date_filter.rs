// src/types/date_filter.rs
use chrono::{Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Named posting-age policies accepted by `search` and `feed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterOption {
    Today,
    Yesterday,
    Last24h,
    Last12h,
    CustomHours,
}

impl DateFilterOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilterOption::Today => "today",
            DateFilterOption::Yesterday => "yesterday",
            DateFilterOption::Last24h => "last_24h",
            DateFilterOption::Last12h => "last_12h",
            DateFilterOption::CustomHours => "custom_hours",
        }
    }

    /// Upstream fetch window in hours. `custom_hours` defers to the caller.
    pub fn upstream_hours(&self, custom_hours: u32) -> u32 {
        match self {
            DateFilterOption::Today => 12,
            DateFilterOption::Yesterday => 36,
            DateFilterOption::Last24h => 24,
            DateFilterOption::Last12h => 12,
            DateFilterOption::CustomHours => custom_hours,
        }
    }

    /// Calendar date every surviving record must be posted on, if this
    /// policy applies a same-day filter at all.
    pub fn target_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateFilterOption::Today => Some(today),
            DateFilterOption::Yesterday => today.checked_sub_days(Days::new(1)),
            DateFilterOption::Last24h
            | DateFilterOption::Last12h
            | DateFilterOption::CustomHours => None,
        }
    }
}

impl fmt::Display for DateFilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFilterOption {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(DateFilterOption::Today),
            "yesterday" => Ok(DateFilterOption::Yesterday),
            "last_24h" => Ok(DateFilterOption::Last24h),
            "last_12h" => Ok(DateFilterOption::Last12h),
            "custom_hours" => Ok(DateFilterOption::CustomHours),
            other => anyhow::bail!(
                "Unsupported date filter: {}. Use today, yesterday, last_24h, last_12h or custom_hours",
                other
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_windows() {
        assert_eq!(DateFilterOption::Today.upstream_hours(72), 12);
        assert_eq!(DateFilterOption::Yesterday.upstream_hours(72), 36);
        assert_eq!(DateFilterOption::Last24h.upstream_hours(72), 24);
        assert_eq!(DateFilterOption::Last12h.upstream_hours(72), 12);
        assert_eq!(DateFilterOption::CustomHours.upstream_hours(72), 72);
    }

    #[test]
    fn test_target_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(DateFilterOption::Today.target_date(today), Some(today));
        assert_eq!(
            DateFilterOption::Yesterday.target_date(today),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        assert_eq!(DateFilterOption::Last24h.target_date(today), None);
        assert_eq!(DateFilterOption::CustomHours.target_date(today), None);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for option in [
            DateFilterOption::Today,
            DateFilterOption::Yesterday,
            DateFilterOption::Last24h,
            DateFilterOption::Last12h,
            DateFilterOption::CustomHours,
        ] {
            assert_eq!(option.as_str().parse::<DateFilterOption>().unwrap(), option);
        }
        assert!("last_week".parse::<DateFilterOption>().is_err());
    }
}
