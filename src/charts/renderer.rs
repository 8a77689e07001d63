//! Static Chart Renderer
//! Draws the population line chart to a PNG file with plotters.
//!
//! Layout matches the interactive chart: one line per zone, legend in the
//! upper left, zero-based y-axis and the years as x labels.

use super::plotter::{year_at, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::data::Dataset;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: dataset has no series")]
    EmptyDataset,
    #[error("Failed to render {path}: {message}")]
    Drawing { path: PathBuf, message: String },
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `dataset` as a `width` x `height` PNG at `path`.
    pub fn render_png(
        dataset: &Dataset,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if dataset.is_empty() {
            return Err(RenderError::EmptyDataset);
        }

        let to_err = |e: &dyn std::fmt::Display| RenderError::Drawing {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| to_err(&e))?;

        let (x_max, y_max) = Self::axis_bounds(dataset);
        let years = dataset.years.clone();

        let mut chart = ChartBuilder::on(&root)
            .margin(25)
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(-0.5..x_max, 0.0..y_max)
            .map_err(|e| to_err(&e))?;

        chart
            .configure_mesh()
            .x_desc(X_AXIS_TITLE)
            .y_desc(Y_AXIS_TITLE)
            .x_labels(years.len().clamp(2, 20))
            .x_label_formatter(&|v| {
                year_at(&years, *v)
                    .map(|y| y.to_string())
                    .unwrap_or_default()
            })
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(|e| to_err(&e))?;

        for series in &dataset.series {
            let color = series.color.to_rgb_color();
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                .map_err(|e| to_err(&e))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))
                .map_err(|e| to_err(&e))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| to_err(&e))?;

        root.present().map_err(|e| to_err(&e))?;
        info!(path = %path.display(), series = dataset.series.len(), "chart image written");
        Ok(())
    }

    /// Upper x and y bounds. The y-axis always starts at 0 and gets 10% headroom.
    fn axis_bounds(dataset: &Dataset) -> (f64, f64) {
        let x_max = (dataset.years.len().max(1) as f64) - 0.5;
        let max = dataset.max_value();
        let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };
        (x_max, y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::SeriesColor;
    use crate::data::Series;

    #[test]
    fn test_empty_dataset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            StaticChartRenderer::render_png(&Dataset::default(), &dir.path().join("c.png"), 800, 600);
        assert!(matches!(result, Err(RenderError::EmptyDataset)));
    }

    #[test]
    fn test_axis_bounds() {
        let dataset = Dataset {
            years: vec![2000, 2010],
            series: vec![Series {
                label: "Europe".to_string(),
                points: vec![100.0, 200.0],
                color: SeriesColor::rgb(0, 0, 0),
            }],
        };
        let (x_max, y_max) = StaticChartRenderer::axis_bounds(&dataset);
        assert_eq!(x_max, 1.5);
        assert!((y_max - 220.0).abs() < 1e-9);

        let flat = Dataset {
            years: vec![2000],
            series: vec![Series {
                label: "Mars".to_string(),
                points: vec![0.0],
                color: SeriesColor::rgb(0, 0, 0),
            }],
        };
        assert_eq!(StaticChartRenderer::axis_bounds(&flat), (0.5, 1.0));
    }
}
