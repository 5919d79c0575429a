// Geographic grouping for the region map.
//
// Locations are " > "-delimited paths. Domestic paths start with a US state
// ("Colorado > Boulder Canyon > ..."); international ones start with the
// literal "International" and carry the country in the third segment
// ("International > Asia > Thailand > Railay").

use log::warn;

use crate::algorithm::grades::{clean_grade, compare_grades};
use crate::algorithm::stats::modal_grade;
use crate::models::{ClimbRecord, RegionMarker, RegionSummary};

const PATH_DELIMITER: &str = " > ";
const INTERNATIONAL: &str = "International";

/// Representative coordinates for known climbing regions: US states keyed by
/// state name, international areas keyed by country/province. Kept as plain
/// data so tests can substitute a synthetic table.
pub static BASE_COORDINATES: &[(&str, f64, f64)] = &[
    // United States
    ("Kentucky", 37.7830, -83.6828),       // Red River Gorge
    ("Wisconsin", 43.4285, -89.7177),      // Devil's Lake
    ("Nevada", 36.1699, -115.4934),        // Red Rock Canyon
    ("California", 37.7379, -119.5466),    // Yosemite
    ("Utah", 38.5733, -109.5498),          // Moab
    ("Colorado", 39.9780, -105.2897),      // Boulder Canyon
    ("Arizona", 34.8697, -111.7610),       // Sedona
    ("Oregon", 44.3981, -121.1423),        // Smith Rock
    ("Washington", 47.5332, -121.0252),    // Index
    ("Wyoming", 43.7904, -107.3925),       // Ten Sleep
    ("New Mexico", 35.2106, -106.4559),    // Sandia Mountains
    ("Texas", 30.5571, -98.8198),          // Enchanted Rock
    ("Idaho", 43.6872, -114.3636),         // Sun Valley
    ("Montana", 45.8356, -111.5019),       // Bozeman
    ("New Hampshire", 44.0537, -71.1284),  // North Conway
    ("West Virginia", 38.4060, -79.3525),  // Seneca Rocks
    ("Tennessee", 35.0844, -85.3397),      // Chattanooga
    ("North Carolina", 35.7977, -82.2674), // Looking Glass
    ("South Dakota", 43.8791, -103.4591),  // Black Hills
    ("Alabama", 33.9192, -86.3089),        // Horse Pens 40
    ("Arkansas", 35.7879, -93.1594),       // Horseshoe Canyon Ranch
    // Europe
    ("Spain", 41.5949, 1.8346),            // Siurana
    ("France", 45.8989, 6.9290),           // Chamonix
    ("Italy", 45.9027, 11.9784),           // Arco
    ("Switzerland", 46.5907, 7.9089),      // Gimmelwald
    ("Greece", 37.0833, 22.8500),          // Kalymnos
    ("Germany", 47.5622, 11.0767),         // Frankenjura
    ("United Kingdom", 54.4500, -3.0886),  // Lake District
    ("Austria", 47.2692, 11.4041),         // Innsbruck
    // Asia
    ("Thailand", 8.0863, 98.2543),         // Krabi
    ("Japan", 35.6762, 138.6386),          // Ogawayama
    ("China", 25.2867, 110.2892),          // Yangshuo
    // Oceania
    ("Australia", -33.7179, 150.3223),     // Blue Mountains
    ("New Zealand", -44.6414, 169.1477),   // Wanaka
    // South America
    ("Argentina", -41.1335, -71.3103),     // Bariloche
    ("Brazil", -22.9492, -43.1545),        // Rio
    ("Chile", -33.4489, -70.6693),         // Santiago
    // Canada
    ("British Columbia", 49.6802, -123.1548), // Squamish
    ("Alberta", 51.0486, -115.3617),       // Canmore
    // Mexico
    ("Mexico", 25.6866, -100.3161),        // Monterrey
];

/// Extract the grouping key from a location path: the country for
/// "International > ..." paths, the first segment otherwise. Paths with too
/// few segments are unresolvable and return `None` instead of panicking.
pub fn region_key(location: &str) -> Option<String> {
    let parts: Vec<&str> = location.split(PATH_DELIMITER).collect();
    let key = match parts.first() {
        Some(&INTERNATIONAL) => parts.get(2).copied(),
        Some(first) => Some(*first),
        None => None,
    }?;
    let key = key.trim();
    if key.is_empty() { None } else { Some(key.to_string()) }
}

/// Group records by region key, preserving the order regions are first seen
/// in. Records with unresolvable locations are dropped from the grouping.
pub fn group_by_region(records: &[ClimbRecord]) -> Vec<(String, Vec<&ClimbRecord>)> {
    let mut groups: Vec<(String, Vec<&ClimbRecord>)> = Vec::new();
    for r in records {
        let key = match region_key(&r.location) {
            Some(k) => k,
            None => {
                warn!("unresolvable location path: '{}'", r.location);
                continue;
            }
        };
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, climbs)) => climbs.push(r),
            None => groups.push((key, vec![r])),
        }
    }
    groups
}

/// Look a region key up in a coordinate table. Unknown regions are `None`,
/// never an error.
pub fn resolve_coordinates(table: &[(&str, f64, f64)], key: &str) -> Option<(f64, f64)> {
    table
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, lat, lon)| (*lat, *lon))
}

/// Popup summary for one region: climb count, grade range and modal grade,
/// all over normalized grades.
fn summarize(climbs: &[&ClimbRecord]) -> RegionSummary {
    let cleaned: Vec<String> = climbs
        .iter()
        .map(|r| clean_grade(r.rating.as_deref()))
        .collect();
    let mut graded: Vec<&String> = cleaned.iter().filter(|g| *g != "N/A").collect();
    graded.sort_by(|a, b| compare_grades(a, b));
    RegionSummary {
        total_climbs: climbs.len(),
        grade_low: graded.first().map_or_else(|| "N/A".to_string(), |g| (*g).clone()),
        grade_high: graded.last().map_or_else(|| "N/A".to_string(), |g| (*g).clone()),
        modal_grade: modal_grade(cleaned.iter().cloned()),
    }
}

/// One marker per region with known coordinates. Regions missing from the
/// table are logged and omitted; they still show up in stats and lists.
pub fn region_markers_with_table(
    records: &[ClimbRecord],
    table: &[(&str, f64, f64)],
) -> Vec<RegionMarker> {
    let mut markers = Vec::new();
    for (region, climbs) in group_by_region(records) {
        match resolve_coordinates(table, &region) {
            Some((lat, lon)) => markers.push(RegionMarker {
                summary: summarize(&climbs),
                region,
                lat,
                lon,
            }),
            None => warn!("no coordinates found for region: {}", region),
        }
    }
    markers
}

pub fn region_markers(records: &[ClimbRecord]) -> Vec<RegionMarker> {
    region_markers_with_table(records, BASE_COORDINATES)
}
