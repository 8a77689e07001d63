//! Zone helpers: distinct zone list and zone filtering.

use super::Record;

/// Label of the dropdown entry that clears the zone filter.
pub const ALL_ZONES_LABEL: &str = "Toutes les zones";

/// Distinct zones in first-seen order.
pub fn distinct_zones(records: &[Record]) -> Vec<String> {
    let mut zones: Vec<String> = Vec::new();
    for record in records {
        if !zones.iter().any(|z| z == &record.zone) {
            zones.push(record.zone.clone());
        }
    }
    zones
}

/// Records matching the zone filter, in their original order.
/// `None` keeps everything.
pub fn filter_by_zone<'a>(records: &'a [Record], zone: Option<&str>) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| zone.map_or(true, |z| r.zone == z))
        .collect()
}

/// Dropdown options: the "all zones" sentinel followed by every zone.
pub fn zone_options(zones: &[String]) -> Vec<(String, Option<String>)> {
    std::iter::once((ALL_ZONES_LABEL.to_string(), None))
        .chain(zones.iter().map(|z| (z.clone(), Some(z.clone()))))
        .collect()
}
