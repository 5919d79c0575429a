// High-level module for the climbing-log pipeline.
// Declares the submodules in `src/algorithm` and re-exports the public API.
pub mod filters;
pub mod geo;
pub mod grades;
pub mod stats;

pub use filters::{RangeError, filter_by_range, parse_bound};
pub use geo::{region_key, region_markers, region_markers_with_table, resolve_coordinates};
pub use grades::{clean_grade, compare_grades, is_climbing_grade};
pub use stats::{aggregate, aggregate_by_year, crag_list, grade_distribution, journal, stats_table};

use chrono::NaiveDate;

use crate::models::{Dashboard, Dataset, Period};

/// One full recomputation pass: filter the snapshot to the selected range,
/// then derive every presentation view from it. Pure function of the
/// dataset snapshot and the range; nothing here touches shared state.
pub fn build_dashboard(dataset: &Dataset, start: NaiveDate, end: NaiveDate) -> Dashboard {
    let filtered = filters::filter_by_range(&dataset.records, start, end);
    Dashboard {
        stats: stats::stats_table(&dataset.records, &filtered),
        grade_distribution: stats::grade_distribution(&filtered),
        crags: stats::crag_list(&filtered),
        journal: stats::journal(&filtered),
        markers: geo::region_markers(&filtered),
    }
}

/// Range-independent summary used by the upload response: record count plus
/// the snapshot's bounding interval.
pub fn dataset_summary(dataset: &Dataset) -> serde_json::Value {
    let stats = stats::aggregate(&dataset.records, Period::AllTime);
    serde_json::json!({
        "records": dataset.records.len(),
        "bounds": dataset.bounds,
        "all_time": stats,
    })
}
