//! Zone markers and their popup content.

use crate::charts::format_population;
use crate::data::Record;
use tracing::debug;

/// Approximate centroids (latitude, longitude) of the zones that get a marker.
pub const ZONE_COORDINATES: [(&str, f64, f64); 6] = [
    ("Afrique", 8.78, 34.51),
    ("Asie", 34.05, 100.62),
    ("Europe", 54.53, 15.26),
    ("Amérique du Nord", 54.53, -105.26),
    ("Amérique latine et Caraïbes", -8.78, -55.49),
    ("Océanie", -22.74, 140.02),
];

/// Centroid of a known zone.
pub fn zone_coordinates(zone: &str) -> Option<(f64, f64)> {
    ZONE_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == zone)
        .map(|&(_, lat, lon)| (lat, lon))
}

/// A (year, population) line of a popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupEntry {
    pub year: i32,
    pub population: f64,
}

/// One map marker per zone, with the entries shown in its popup.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMarker {
    pub zone: String,
    pub lat: f64,
    pub lon: f64,
    pub entries: Vec<PopupEntry>,
}

impl ZoneMarker {
    /// Popup body: the zone name, then one line per entry in record order.
    pub fn popup_text(&self) -> String {
        let mut text = self.zone.clone();
        for entry in &self.entries {
            text.push_str(&format!(
                "\nAnnée {} : {} millions",
                entry.year,
                format_population(entry.population)
            ));
        }
        text
    }
}

/// Build the markers from records in load order.
///
/// A marker is created at a zone's first record and every later record of
/// that zone adds a popup entry. Zones without known coordinates are skipped.
pub fn build_markers(records: &[Record]) -> Vec<ZoneMarker> {
    let mut markers: Vec<ZoneMarker> = Vec::new();

    for record in records {
        let entry = PopupEntry {
            year: record.year,
            population: record.population,
        };

        if let Some(marker) = markers.iter_mut().find(|m| m.zone == record.zone) {
            marker.entries.push(entry);
            continue;
        }

        match zone_coordinates(&record.zone) {
            Some((lat, lon)) => markers.push(ZoneMarker {
                zone: record.zone.clone(),
                lat,
                lon,
                entries: vec![entry],
            }),
            None => debug!(zone = %record.zone, "no coordinates for zone, skipping marker"),
        }
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_marker_per_known_zone() {
        let records = vec![
            Record::new("Europe", 2010, 735.0),
            Record::new("Asie", 2000, 3700.0),
            Record::new("Europe", 2000, 700.5),
        ];
        let markers = build_markers(&records);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].zone, "Europe");
        assert_eq!((markers[0].lat, markers[0].lon), (54.53, 15.26));
        assert_eq!(markers[1].zone, "Asie");
    }

    #[test]
    fn test_entries_accumulate_in_record_order() {
        let records = vec![
            Record::new("Europe", 2010, 735.0),
            Record::new("Europe", 1990, 720.0),
            Record::new("Europe", 2000, 700.5),
        ];
        let markers = build_markers(&records);
        let years: Vec<i32> = markers[0].entries.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![2010, 1990, 2000]);
        assert_eq!(
            markers[0].popup_text(),
            "Europe\nAnnée 2010 : 735 millions\nAnnée 1990 : 720 millions\nAnnée 2000 : 700.5 millions"
        );
    }

    #[test]
    fn test_unknown_zone_has_no_marker() {
        let records = vec![Record::new("Mars", 2020, 5.0)];
        assert!(build_markers(&records).is_empty());
        assert_eq!(zone_coordinates("Mars"), None);
    }

    #[test]
    fn test_coordinates_in_range() {
        for (_, lat, lon) in ZONE_COORDINATES {
            assert!((-90.0..=90.0).contains(&lat));
            assert!((-180.0..=180.0).contains(&lon));
        }
    }
}
