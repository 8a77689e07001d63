//! Map Viewer Widget
//! Equirectangular world view (x = longitude, y = latitude) with one marker
//! per known zone. Hovering a marker shows its popup as a tooltip; clicking
//! one pins the popup under the map.

use super::markers::ZoneMarker;
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints, Points};
use std::collections::HashMap;

const MAP_HEIGHT: f32 = 320.0;
const GRATICULE_STEP: i32 = 30;
/// Click distance (degrees) within which a marker is picked.
const PICK_RADIUS: f64 = 6.0;

const MARKER_COLOR: Color32 = Color32::from_rgb(231, 76, 60);
const GRID_COLOR: Color32 = Color32::from_rgb(120, 120, 120);
const AXIS_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

/// Map with its markers and the pinned popup, if any.
#[derive(Default)]
pub struct MapViewer {
    markers: Vec<ZoneMarker>,
    popups: HashMap<String, String>,
    selected: Option<usize>,
}

impl MapViewer {
    pub fn new(markers: Vec<ZoneMarker>) -> Self {
        let popups = markers
            .iter()
            .map(|m| (m.zone.clone(), m.popup_text()))
            .collect();
        Self {
            markers,
            popups,
            selected: None,
        }
    }

    #[cfg(test)]
    pub fn markers(&self) -> &[ZoneMarker] {
        &self.markers
    }

    pub fn selected(&self) -> Option<&ZoneMarker> {
        self.selected.and_then(|i| self.markers.get(i))
    }

    /// Index of the marker closest to (lon, lat) within the pick radius.
    pub fn pick(&self, lon: f64, lat: f64) -> Option<usize> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, m)| (i, (m.lon - lon).hypot(m.lat - lat)))
            .filter(|&(_, d)| d <= PICK_RADIUS)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let popups = self.popups.clone();
        let mut clicked_at: Option<(f64, f64)> = None;

        Plot::new("zone_map")
            .height(MAP_HEIGHT)
            .data_aspect(1.0)
            .include_x(-180.0)
            .include_x(180.0)
            .include_y(-90.0)
            .include_y(90.0)
            .show_grid(false)
            .allow_scroll(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .label_formatter(move |name, _value| popups.get(name).cloned().unwrap_or_default())
            .show(ui, |plot_ui| {
                for line in graticule() {
                    plot_ui.line(line);
                }

                for marker in &self.markers {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[marker.lon, marker.lat]]))
                            .radius(6.0)
                            .filled(true)
                            .color(MARKER_COLOR)
                            .name(&marker.zone),
                    );
                }

                if plot_ui.response().clicked() {
                    if let Some(pos) = plot_ui.pointer_coordinate() {
                        clicked_at = Some((pos.x, pos.y));
                    }
                }
            });

        if let Some((lon, lat)) = clicked_at {
            self.selected = self.pick(lon, lat);
        }

        if let Some(marker) = self.selected() {
            ui.add_space(6.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    let mut lines = marker.popup_text().lines().map(str::to_owned).collect::<Vec<_>>();
                    if !lines.is_empty() {
                        let title = lines.remove(0);
                        ui.label(RichText::new(title).strong().size(14.0));
                    }
                    for line in lines {
                        ui.label(RichText::new(line).size(12.0));
                    }
                });
        }
    }
}

/// Base layer: meridians and parallels every 30 degrees, with the equator
/// and prime meridian highlighted.
fn graticule() -> Vec<Line> {
    let mut lines = Vec::new();

    for lon in (-180..=180).step_by(GRATICULE_STEP as usize) {
        let color = if lon == 0 { AXIS_COLOR } else { GRID_COLOR };
        lines.push(
            Line::new(PlotPoints::from(vec![[lon as f64, -90.0], [lon as f64, 90.0]]))
                .color(color)
                .width(0.5),
        );
    }
    for lat in (-90..=90).step_by(GRATICULE_STEP as usize) {
        let color = if lat == 0 { AXIS_COLOR } else { GRID_COLOR };
        lines.push(
            Line::new(PlotPoints::from(vec![[-180.0, lat as f64], [180.0, lat as f64]]))
                .color(color)
                .width(0.5),
        );
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::map::build_markers;

    fn viewer() -> MapViewer {
        MapViewer::new(build_markers(&[
            Record::new("Europe", 2000, 700.5),
            Record::new("Asie", 2000, 3700.0),
        ]))
    }

    #[test]
    fn test_pick_nearest_marker() {
        let viewer = viewer();
        assert_eq!(viewer.pick(15.0, 54.0), Some(0));
        assert_eq!(viewer.pick(101.0, 35.0), Some(1));
        assert_eq!(viewer.pick(-150.0, -60.0), None);
    }

    #[test]
    fn test_popups_indexed_by_zone() {
        let viewer = viewer();
        assert_eq!(viewer.markers().len(), 2);
        assert!(viewer.popups["Europe"].starts_with("Europe\n"));
        assert!(viewer.selected().is_none());
    }

    #[test]
    fn test_graticule_line_count() {
        // 13 meridians, 7 parallels
        assert_eq!(graticule().len(), 20);
    }
}
