use chrono::NaiveDate;
use tickboard::algorithm::filter_by_range;
use tickboard::models::ClimbRecord;

fn tick(date: &str, route: &str) -> ClimbRecord {
    ClimbRecord {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        route: route.to_string(),
        rating: None,
        location: String::new(),
        length: None,
        notes: None,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_filter_includes_both_endpoints() {
    let records = vec![
        tick("2024-01-01", "on start"),
        tick("2024-01-31", "on end"),
        tick("2024-01-15", "inside"),
    ];
    let out = filter_by_range(&records, date("2024-01-01"), date("2024-01-31"));
    assert_eq!(out.len(), 3);
}

#[test]
fn test_filter_excludes_one_day_outside() {
    let records = vec![
        tick("2023-12-31", "day before start"),
        tick("2024-02-01", "day after end"),
        tick("2024-01-15", "inside"),
    ];
    let out = filter_by_range(&records, date("2024-01-01"), date("2024-01-31"));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].route, "inside");
}

#[test]
fn test_single_day_range() {
    let records = vec![tick("2024-01-15", "a"), tick("2024-01-16", "b")];
    let out = filter_by_range(&records, date("2024-01-15"), date("2024-01-15"));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].route, "a");
}

#[test]
fn test_inverted_range_yields_empty() {
    let records = vec![tick("2024-01-15", "a")];
    let out = filter_by_range(&records, date("2024-02-01"), date("2024-01-01"));
    assert!(out.is_empty());
}
