//! Series Builder Module
//! Pivots long-format records into one series per zone on a shared year axis.

use super::zones::filter_by_zone;
use super::Record;
use crate::charts::{ColorSource, SeriesColor};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// One plotted line: a zone's population on every year of the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<f64>,
    pub color: SeriesColor,
}

/// Chart-ready data: the sorted year axis and one series per zone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub years: Vec<i32>,
    pub series: Vec<Series>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Largest plotted value, 0.0 for an empty dataset.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Builds chart datasets from loaded records.
pub struct SeriesBuilder;

impl SeriesBuilder {
    /// Build the dataset for the given zone filter (`None` = all zones).
    ///
    /// When several records share a (zone, year) pair the first one wins.
    /// Missing pairs are plotted as 0.0.
    pub fn build(records: &[Record], zone: Option<&str>, colors: &ColorSource) -> Dataset {
        let filtered = filter_by_zone(records, zone);

        let mut years: Vec<i32> = filtered.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let zones: Vec<&str> = match zone {
            Some(z) => vec![z],
            None => {
                let mut seen: Vec<&str> = Vec::new();
                for record in &filtered {
                    if !seen.contains(&record.zone.as_str()) {
                        seen.push(&record.zone);
                    }
                }
                seen
            }
        };

        let mut lookup: HashMap<(&str, i32), f64> = HashMap::new();
        for record in &filtered {
            if let Entry::Vacant(slot) = lookup.entry((record.zone.as_str(), record.year)) {
                slot.insert(record.population);
            }
        }

        let series = zones
            .into_iter()
            .zip(colors.sequence())
            .map(|(zone, color)| Series {
                label: zone.to_string(),
                points: years
                    .iter()
                    .map(|&year| lookup.get(&(zone, year)).copied().unwrap_or(0.0))
                    .collect(),
                color,
            })
            .collect();

        Dataset { years, series }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new("Europe", 2010, 735.0),
            Record::new("Asie", 2000, 3700.0),
            Record::new("Europe", 2000, 700.5),
            Record::new("Europe", 2000, 701.0),
            Record::new("Asie", 1990, 3200.0),
            Record::new("Mars", 2020, 5.0),
        ]
    }

    fn build(zone: Option<&str>) -> Dataset {
        SeriesBuilder::build(&records(), zone, &ColorSource::from_seed(Some(7)))
    }

    #[test]
    fn test_year_axis_sorted_and_distinct() {
        let dataset = build(None);
        assert_eq!(dataset.years, vec![1990, 2000, 2010, 2020]);
    }

    #[test]
    fn test_series_follow_discovery_order() {
        let labels: Vec<_> = build(None).series.into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Europe", "Asie", "Mars"]);
    }

    #[test]
    fn test_points_aligned_and_missing_filled_with_zero() {
        let dataset = build(None);
        for series in &dataset.series {
            assert_eq!(series.points.len(), dataset.years.len());
        }
        let asie = &dataset.series[1];
        assert_eq!(asie.points, vec![3200.0, 3700.0, 0.0, 0.0]);
        let mars = &dataset.series[2];
        assert_eq!(mars.points, vec![0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let dataset = build(None);
        let europe = &dataset.series[0];
        assert_eq!(europe.points[1], 700.5);
    }

    #[test]
    fn test_zone_filter_gives_single_series() {
        let dataset = build(Some("Europe"));
        assert_eq!(dataset.years, vec![2000, 2010]);
        assert_eq!(dataset.series.len(), 1);
        assert_eq!(dataset.series[0].label, "Europe");
        assert_eq!(dataset.series[0].points, vec![700.5, 735.0]);
    }

    #[test]
    fn test_unknown_zone_filter() {
        let dataset = build(Some("Lune"));
        assert!(dataset.years.is_empty());
        assert_eq!(dataset.series.len(), 1);
        assert!(dataset.series[0].points.is_empty());
    }

    #[test]
    fn test_empty_records() {
        let dataset = SeriesBuilder::build(&[], None, &ColorSource::from_seed(None));
        assert!(dataset.is_empty());
        assert!(dataset.years.is_empty());
        assert_eq!(dataset.max_value(), 0.0);
    }

    #[test]
    fn test_seeded_colors_stable_across_builds() {
        let colors = |d: Dataset| d.series.into_iter().map(|s| s.color).collect::<Vec<_>>();
        assert_eq!(colors(build(None)), colors(build(None)));
    }

    #[test]
    fn test_max_value() {
        assert_eq!(build(None).max_value(), 3700.0);
    }
}
