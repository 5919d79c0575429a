// Date-range filtering over a record snapshot.
//
// An invalid or inverted range never produces a partial view: callers skip
// the recomputation entirely and keep the last good output on screen.

use std::error::Error;
use std::fmt;

use chrono::NaiveDate;

use crate::models::ClimbRecord;

#[derive(Debug, PartialEq, Eq)]
pub enum RangeError {
    /// A bound failed to parse as a date.
    Invalid(String),
    /// Start after end.
    Inverted,
    /// No explicit bounds and no dataset to default them from.
    EmptyDataset,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Invalid(s) => write!(f, "invalid date bound: '{}'", s),
            RangeError::Inverted => write!(f, "start date is after end date"),
            RangeError::EmptyDataset => write!(f, "no records loaded and no explicit date range given"),
        }
    }
}

impl Error for RangeError {}

/// Parse a "YYYY-MM-DD" filter bound.
pub fn parse_bound(raw: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| RangeError::Invalid(raw.to_string()))
}

/// Inclusive-both-ends filter on record date. An inverted range yields an
/// empty set rather than an error; the HTTP layer treats unparsable bounds
/// separately via `parse_bound`.
pub fn filter_by_range(records: &[ClimbRecord], start: NaiveDate, end: NaiveDate) -> Vec<ClimbRecord> {
    if start > end {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> ClimbRecord {
        ClimbRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            route: "Test".to_string(),
            rating: None,
            location: String::new(),
            length: None,
            notes: None,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let records = vec![
            record("2024-01-01"),
            record("2024-01-15"),
            record("2024-01-31"),
            record("2023-12-31"),
            record("2024-02-01"),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let out = filter_by_range(&records, start, end);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let records = vec![record("2024-01-15")];
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(filter_by_range(&records, start, end).is_empty());
    }

    #[test]
    fn test_parse_bound() {
        assert!(parse_bound("2024-01-05").is_ok());
        assert!(parse_bound("05/01/2024").is_err());
        assert!(parse_bound("").is_err());
    }
}
