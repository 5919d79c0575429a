// Core data structures shared across ingest, algorithm and server.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged ascent, as parsed from a Mountain Project style tick export.
/// Loader contract: `date` parsed successfully and `route` non-empty for
/// every record that survives ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbRecord {
    pub date: NaiveDate,
    pub route: String,
    /// Raw grade string, possibly with trailing protection annotations
    /// ("5.9 R", "5.11a PG13"). Normalization happens in `algorithm::grades`.
    pub rating: Option<String>,
    /// Hierarchical " > "-delimited location path. May be empty.
    pub location: String,
    /// Route length in feet. Absent or non-numeric values aggregate as 0.
    pub length: Option<u32>,
    pub notes: Option<String>,
}

/// The immutable snapshot every recomputation pass works against: the full
/// record set plus its bounding date interval. Replaced wholesale on reload,
/// never patched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub records: Vec<ClimbRecord>,
    /// (earliest, latest) date across all records. `None` when empty.
    pub bounds: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    pub fn from_records(records: Vec<ClimbRecord>) -> Self {
        let min = records.iter().map(|r| r.date).min();
        let max = records.iter().map(|r| r.date).max();
        let bounds = match (min, max) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        };
        Dataset { records, bounds }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Which slice of the log a stats row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Year(i32),
    SelectedRange,
    AllTime,
}

impl Period {
    pub fn label(&self) -> String {
        match self {
            Period::Year(y) => y.to_string(),
            Period::SelectedRange => "Selected Range".to_string(),
            Period::AllTime => "All Time".to_string(),
        }
    }
}

/// One row of the stats table: a calendar year, the selected range or the
/// all-time summary.
#[derive(Debug, Clone, Serialize)]
pub struct StatRow {
    pub period: String,
    pub total_climbs: usize,
    pub days_outdoors: usize,
    pub unique_crags: usize,
    pub total_feet: u64,
    pub average_grade: String,
    pub top_grade: String,
}

/// A journal entry: any filtered record carrying non-empty notes.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub route: String,
    pub grade: String,
    pub notes: String,
}

/// Popup summary for one map region.
#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub total_climbs: usize,
    pub grade_low: String,
    pub grade_high: String,
    pub modal_grade: String,
}

/// One map marker: a resolvable region with its coordinates and summary.
#[derive(Debug, Clone, Serialize)]
pub struct RegionMarker {
    pub region: String,
    pub lat: f64,
    pub lon: f64,
    pub summary: RegionSummary,
}

/// Everything the presentation layer needs for one recomputation pass.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: Vec<StatRow>,
    /// Normalized grade -> count, ascending by grade order. Chart feed.
    pub grade_distribution: Vec<(String, u32)>,
    /// Distinct crag paths, lexically sorted.
    pub crags: Vec<String>,
    /// Records with notes, most recent first.
    pub journal: Vec<JournalEntry>,
    pub markers: Vec<RegionMarker>,
}
