use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::filters::{RangeError, parse_bound};
use crate::models::Dataset;

/// Date-range query parameters shared by every derived-view endpoint.
///
/// Both bounds are optional "YYYY-MM-DD" strings; a missing bound defaults
/// to the corresponding edge of the loaded dataset's date interval. An
/// unparsable or inverted range is rejected before any recomputation runs,
/// so a bad query can never replace a good view with a partial one.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Body of `POST /ticks`: raw CSV text pasted by the user. Replaces the
/// active dataset in full on success.
#[derive(Debug, Serialize, Deserialize)]
pub struct TicksUpload {
    pub csv: String,
}

fn explicit(bound: &Option<String>) -> Option<&str> {
    bound.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve a query into concrete filter bounds, defaulting missing ones to
/// the dataset's bounding interval.
pub fn resolve_range(query: &RangeQuery, dataset: &Dataset) -> Result<(NaiveDate, NaiveDate), RangeError> {
    let start = match explicit(&query.start) {
        Some(raw) => parse_bound(raw)?,
        None => dataset.bounds.ok_or(RangeError::EmptyDataset)?.0,
    };
    let end = match explicit(&query.end) {
        Some(raw) => parse_bound(raw)?,
        None => dataset.bounds.ok_or(RangeError::EmptyDataset)?.1,
    };
    if start > end {
        return Err(RangeError::Inverted);
    }
    Ok((start, end))
}
