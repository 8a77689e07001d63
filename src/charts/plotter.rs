//! Chart Plotter Module
//! Interactive population line chart using egui_plot.

use crate::data::Dataset;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints, Points};

/// X-axis title.
pub const X_AXIS_TITLE: &str = "Année";
/// Y-axis title.
pub const Y_AXIS_TITLE: &str = "Population (en millions)";
/// Unit appended to tooltip values.
pub const UNIT_SUFFIX: &str = "millions";

const CHART_HEIGHT: f32 = 420.0;

/// A drawn line chart. Owns its dataset; the plot id carries a generation
/// number so a recreated chart starts with fresh zoom/pan state.
pub struct LineChart {
    dataset: Dataset,
    plot_id: String,
}

impl LineChart {
    pub fn new(dataset: Dataset, generation: u64) -> Self {
        Self {
            dataset,
            plot_id: format!("population_chart_{}", generation),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[cfg(test)]
    pub fn plot_id(&self) -> &str {
        &self.plot_id
    }

    /// Draw the chart: x positions are year indices so years are evenly
    /// spaced like category labels.
    pub fn show(&self, ui: &mut egui::Ui) {
        let axis_years = self.dataset.years.clone();
        let tooltip_years = self.dataset.years.clone();

        Plot::new(&self.plot_id)
            .height(CHART_HEIGHT)
            .legend(
                Legend::default()
                    .position(Corner::LeftTop)
                    .text_style(egui::TextStyle::Body),
            )
            .include_y(0.0)
            .allow_scroll(false)
            .x_axis_label(X_AXIS_TITLE)
            .y_axis_label(Y_AXIS_TITLE)
            .x_axis_formatter(move |mark, _range| {
                year_at(&axis_years, mark.value)
                    .map(|y| y.to_string())
                    .unwrap_or_default()
            })
            .label_formatter(move |name, value| {
                if name.is_empty() {
                    return String::new();
                }
                let year = year_at(&tooltip_years, value.x)
                    .map(|y| y.to_string())
                    .unwrap_or_default();
                format!("{}\n{}\n{}", name, year, tooltip_label(value.y))
            })
            .show(ui, |plot_ui| {
                for series in &self.dataset.series {
                    let points: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64, v])
                        .collect();
                    let color = series.color.to_color32();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(&series.label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(3.0)
                            .color(color)
                            .name(&series.label),
                    );
                }
            });
    }
}

/// Year shown at an x position, only for exact integer indices on the axis.
pub fn year_at(years: &[i32], x: f64) -> Option<i32> {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return None;
    }
    years.get(idx as usize).copied()
}

/// Tooltip line for a population value, e.g. `Population: 1,234.5 millions`.
pub fn tooltip_label(value: f64) -> String {
    format!("Population: {} {}", format_population(value), UNIT_SUFFIX)
}

/// Format with thousands separators and at most three fraction digits.
pub fn format_population(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0.0), "0");
        assert_eq!(format_population(700.5), "700.5");
        assert_eq!(format_population(1234.0), "1,234");
        assert_eq!(format_population(7794.798739), "7,794.799");
        assert_eq!(format_population(1234567.125), "1,234,567.125");
        assert_eq!(format_population(-4321.1), "-4,321.1");
        assert_eq!(format_population(0.0001), "0");
    }

    #[test]
    fn test_tooltip_label() {
        assert_eq!(tooltip_label(1500.0), "Population: 1,500 millions");
    }

    #[test]
    fn test_year_at() {
        let years = [1990, 2000, 2010];
        assert_eq!(year_at(&years, 0.0), Some(1990));
        assert_eq!(year_at(&years, 2.0), Some(2010));
        assert_eq!(year_at(&years, 1.5), None);
        assert_eq!(year_at(&years, 3.0), None);
        assert_eq!(year_at(&years, -1.0), None);
    }

    #[test]
    fn test_line_chart_id_tracks_generation() {
        let chart = LineChart::new(Dataset::default(), 3);
        assert_eq!(chart.plot_id(), "population_chart_3");
        assert!(chart.dataset().is_empty());
    }
}
