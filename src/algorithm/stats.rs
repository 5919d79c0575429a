// Summary statistics over a record set.
//
// All six metrics are computed by one kernel (`aggregate`) shared by the
// per-year rows, the selected-range row and the all-time row. Per-year rows
// always cover the complete unfiltered log, matching the stats table the
// visualizer shows alongside the filtered views.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Datelike;

use crate::algorithm::grades::{clean_grade, compare_grades, is_climbing_grade};
use crate::models::{ClimbRecord, JournalEntry, Period, StatRow};

/// Most frequent grade in iteration order; ties go to the grade seen first.
/// One shared algorithm for the stats table and the map popups.
pub fn modal_grade<I>(grades: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for g in grades {
        match counts.iter_mut().find(|(name, _)| *name == g) {
            Some((_, n)) => *n += 1,
            None => counts.push((g, 1)),
        }
    }
    let mut best: Option<&(String, usize)> = None;
    for entry in counts.iter() {
        // Strictly greater keeps the first-seen grade on ties.
        if best.map_or(true, |(_, n)| entry.1 > *n) {
            best = Some(entry);
        }
    }
    best.map(|(g, _)| g.clone()).unwrap_or_else(|| "N/A".to_string())
}

/// Hardest grade under the numeric-aware comparator, considering only
/// "5.x" grades. "N/A" when nothing qualifies.
pub fn top_grade<I>(grades: I) -> String
where
    I: IntoIterator<Item = String>,
{
    grades
        .into_iter()
        .filter(|g| is_climbing_grade(g))
        .max_by(|a, b| compare_grades(a, b))
        .unwrap_or_else(|| "N/A".to_string())
}

/// The six-metric kernel: climbs, distinct days out, distinct crags, summed
/// feet, modal grade, top grade.
pub fn aggregate(records: &[ClimbRecord], period: Period) -> StatRow {
    let days: HashSet<_> = records.iter().map(|r| r.date).collect();
    let crags: HashSet<&str> = records.iter().map(|r| r.location.as_str()).collect();
    let total_feet: u64 = records.iter().map(|r| u64::from(r.length.unwrap_or(0))).sum();
    let cleaned = || records.iter().map(|r| clean_grade(r.rating.as_deref()));

    StatRow {
        period: period.label(),
        total_climbs: records.len(),
        days_outdoors: days.len(),
        unique_crags: crags.len(),
        total_feet,
        average_grade: if records.is_empty() {
            "N/A".to_string()
        } else {
            modal_grade(cleaned())
        },
        top_grade: top_grade(cleaned()),
    }
}

/// One row per calendar year of the complete log, ascending.
pub fn aggregate_by_year(records: &[ClimbRecord]) -> Vec<StatRow> {
    let years: BTreeSet<i32> = records.iter().map(|r| r.date.year()).collect();
    years
        .into_iter()
        .map(|year| {
            let year_records: Vec<ClimbRecord> = records
                .iter()
                .filter(|r| r.date.year() == year)
                .cloned()
                .collect();
            aggregate(&year_records, Period::Year(year))
        })
        .collect()
}

/// The full stats table: yearly rows over the complete log, then the
/// selected-range row, then the all-time row.
pub fn stats_table(all: &[ClimbRecord], filtered: &[ClimbRecord]) -> Vec<StatRow> {
    let mut rows = aggregate_by_year(all);
    rows.push(aggregate(filtered, Period::SelectedRange));
    rows.push(aggregate(all, Period::AllTime));
    rows
}

/// Normalized grade -> count, ascending by grade order, "N/A" excluded.
/// Feeds the grade-distribution chart.
pub fn grade_distribution(records: &[ClimbRecord]) -> Vec<(String, u32)> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for r in records {
        let grade = clean_grade(r.rating.as_deref());
        if grade != "N/A" {
            *counts.entry(grade).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(String, u32)> = counts.into_iter().collect();
    out.sort_by(|a, b| compare_grades(&a.0, &b.0));
    out
}

/// Distinct crag paths, lexically sorted. Empty locations are left out of
/// the list (they still count toward the unique-crag metric).
pub fn crag_list(records: &[ClimbRecord]) -> Vec<String> {
    let crags: BTreeSet<String> = records
        .iter()
        .filter(|r| !r.location.is_empty())
        .map(|r| r.location.clone())
        .collect();
    crags.into_iter().collect()
}

/// Records with notes, most recent first.
pub fn journal(records: &[ClimbRecord]) -> Vec<JournalEntry> {
    let mut entries: Vec<JournalEntry> = records
        .iter()
        .filter_map(|r| {
            r.notes.as_ref().map(|notes| JournalEntry {
                date: r.date,
                route: r.route.clone(),
                grade: clean_grade(r.rating.as_deref()),
                notes: notes.clone(),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_grade_first_seen_tie_break() {
        let grades = vec!["5.9", "5.10a", "5.9", "5.10a"];
        let modal = modal_grade(grades.into_iter().map(String::from));
        assert_eq!(modal, "5.9");
    }

    #[test]
    fn test_top_grade_skips_non_ys_grades() {
        let grades = vec!["V4", "5.9", "N/A", "5.10a"];
        let top = top_grade(grades.into_iter().map(String::from));
        assert_eq!(top, "5.10a");
    }

    #[test]
    fn test_top_grade_empty_is_na() {
        assert_eq!(top_grade(Vec::<String>::new()), "N/A");
        let only_boulders = vec!["V2".to_string(), "V5".to_string()];
        assert_eq!(top_grade(only_boulders), "N/A");
    }
}
