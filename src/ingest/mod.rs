// CSV ingest for climbing-log tick exports.
//
// The loader is strict about the contract and lenient about the data: a row
// survives only with a parseable date and a non-empty route, everything else
// degrades to empty/zero.

use std::error::Error;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{ClimbRecord, Dataset};

/// Failure modes of a load. Nothing here is fatal for the server: callers
/// keep the previously loaded dataset (or start empty) on any of these.
#[derive(Debug)]
pub enum LoadError {
    /// Malformed CSV that the reader could not get through.
    Parse(csv::Error),
    /// CSV parsed fine but no row carried both a valid date and a route.
    NoValidRecords,
    /// Could not read the default dataset file.
    Io(std::io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(e) => write!(f, "failed to parse CSV: {}", e),
            LoadError::NoValidRecords => {
                write!(f, "no valid climbing records found (rows need Date and Route)")
            }
            LoadError::Io(e) => write!(f, "failed to read dataset: {}", e),
        }
    }
}

impl Error for LoadError {}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Raw row shape of a tick export. Column names are case-sensitive and match
/// the export header; missing columns fall back to empty strings.
#[derive(Debug, Deserialize)]
struct RawTick {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Route", default)]
    route: String,
    #[serde(rename = "Rating", default)]
    rating: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Length", default)]
    length: String,
    #[serde(rename = "Notes", default)]
    notes: String,
}

/// Dates come in ISO form from recent exports and US locale form from older
/// ones; accept both.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn non_empty(s: String) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

/// Parse raw CSV text (pasted or bundled) into the normalized record set.
/// Rows missing a date or route are silently dropped; a whole-file parse
/// failure or an empty surviving set is an error and leaves the caller's
/// previous dataset untouched.
pub fn parse_ticks(csv_text: &str) -> Result<Vec<ClimbRecord>, LoadError> {
    // Strict row lengths: a row whose field count disagrees with the header
    // is malformed CSV, not a droppable record.
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut records: Vec<ClimbRecord> = Vec::new();
    for row in rdr.deserialize::<RawTick>() {
        let raw = row?;
        let date = match parse_date(&raw.date) {
            Some(d) => d,
            None => continue,
        };
        let route = match non_empty(raw.route) {
            Some(r) => r,
            None => continue,
        };
        records.push(ClimbRecord {
            date,
            route,
            rating: non_empty(raw.rating),
            location: raw.location.trim().to_string(),
            length: raw.length.trim().parse::<u32>().ok(),
            notes: non_empty(raw.notes),
        });
    }

    if records.is_empty() {
        return Err(LoadError::NoValidRecords);
    }
    Ok(records)
}

/// Parse CSV text straight into a dataset snapshot with recomputed bounds.
pub fn dataset_from_csv(csv_text: &str) -> Result<Dataset, LoadError> {
    Ok(Dataset::from_records(parse_ticks(csv_text)?))
}

/// Load the bundled default dataset at startup. The caller degrades to an
/// empty dataset on failure so the paste-in surface still works.
pub fn load_default<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    dataset_from_csv(&text)
}
