// Grade normalization and ordering.
//
// Tick exports carry grades like "5.10a PG13" or "5.9 R"; everything after
// the first space is a protection/danger annotation, not part of the grade.
// Ordering must be numeric-aware: plain lexical comparison puts "5.10a"
// before "5.9", which inverts the climbing convention.

use std::cmp::Ordering;

/// Strip trailing annotation tokens from a raw grade. Empty or absent
/// ratings normalize to "N/A". Idempotent.
pub fn clean_grade(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => match s.split_whitespace().next() {
            Some(first) => first.to_string(),
            None => "N/A".to_string(),
        },
        _ => "N/A".to_string(),
    }
}

/// True for sport/trad grades on the Yosemite Decimal System ("5.x").
/// Excludes boulder problems, ice grades and "N/A" from top-grade picks.
pub fn is_climbing_grade(grade: &str) -> bool {
    grade.starts_with("5.")
}

#[derive(Debug, PartialEq, Eq)]
enum Seg {
    Num(u64),
    Text(String),
}

/// Split a grade into digit runs and non-digit runs, so "5.10a" becomes
/// [5, ".", 10, "a"] and its numeric parts compare as numbers.
fn segments(s: &str) -> Vec<Seg> {
    let mut out = Vec::new();
    let mut digits = String::new();
    let mut text = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                out.push(Seg::Text(std::mem::take(&mut text)));
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                out.push(Seg::Num(digits.parse().unwrap_or(0)));
                digits.clear();
            }
            text.extend(c.to_lowercase());
        }
    }
    if !digits.is_empty() {
        out.push(Seg::Num(digits.parse().unwrap_or(0)));
    }
    if !text.is_empty() {
        out.push(Seg::Text(text));
    }
    out
}

/// Numeric-aware, case-insensitive grade comparison: "5.9" < "5.10a",
/// "5.10a" < "5.10b" < "5.11". Underlies the chart axis sort and the
/// top-grade pick.
pub fn compare_grades(a: &str, b: &str) -> Ordering {
    let sa = segments(a);
    let sb = segments(b);
    for pair in sa.iter().zip(sb.iter()) {
        let ord = match pair {
            (Seg::Num(x), Seg::Num(y)) => x.cmp(y),
            (Seg::Text(x), Seg::Text(y)) => x.cmp(y),
            // A digit run sorts before a letter run at the same position.
            (Seg::Num(_), Seg::Text(_)) => Ordering::Less,
            (Seg::Text(_), Seg::Num(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    sa.len().cmp(&sb.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_grade_strips_annotations() {
        assert_eq!(clean_grade(Some("5.9 R")), "5.9");
        assert_eq!(clean_grade(Some("5.11a PG13")), "5.11a");
        assert_eq!(clean_grade(Some("5.10c")), "5.10c");
        assert_eq!(clean_grade(Some("")), "N/A");
        assert_eq!(clean_grade(None), "N/A");
    }

    #[test]
    fn test_clean_grade_idempotent() {
        for raw in ["5.9 R", "V4", "", "5.12d X"] {
            let once = clean_grade(Some(raw));
            assert_eq!(clean_grade(Some(once.as_str())), once);
        }
    }

    #[test]
    fn test_compare_is_numeric_aware() {
        assert_eq!(compare_grades("5.9", "5.10a"), Ordering::Less);
        assert_eq!(compare_grades("5.10a", "5.9"), Ordering::Greater);
        assert_eq!(compare_grades("5.10a", "5.10b"), Ordering::Less);
        assert_eq!(compare_grades("5.10d", "5.11"), Ordering::Less);
        assert_eq!(compare_grades("5.8", "5.8"), Ordering::Equal);
    }

    #[test]
    fn test_is_climbing_grade() {
        assert!(is_climbing_grade("5.9"));
        assert!(is_climbing_grade("5.12a"));
        assert!(!is_climbing_grade("V4"));
        assert!(!is_climbing_grade("N/A"));
        assert!(!is_climbing_grade("WI3"));
    }
}
