//! Chart Viewer Widget
//! Holds the single line chart shown in the central panel.

use crate::charts::LineChart;
use crate::data::Dataset;
use egui::RichText;
use tracing::debug;

/// Owned slot for the line chart. Every redraw closes the current chart and
/// creates a new one.
#[derive(Default)]
pub struct ChartViewer {
    chart: Option<LineChart>,
    generation: u64,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current chart, if any.
    pub fn close(&mut self) {
        if self.chart.take().is_some() {
            debug!(generation = self.generation, "chart closed");
        }
    }

    /// Close the current chart and build a new one from `dataset`.
    pub fn close_then_recreate(&mut self, dataset: Dataset) {
        self.close();
        self.generation += 1;
        debug!(
            generation = self.generation,
            series = dataset.series.len(),
            years = dataset.years.len(),
            "chart created"
        );
        self.chart = Some(LineChart::new(dataset, self.generation));
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.chart.as_ref().map(|c| c.dataset())
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        match &self.chart {
            Some(chart) => chart.show(ui),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recreate_bumps_generation() {
        let mut viewer = ChartViewer::new();
        assert!(viewer.dataset().is_none());

        viewer.close_then_recreate(Dataset::default());
        assert_eq!(viewer.generation(), 1);
        assert!(viewer.dataset().is_some());

        let dataset = Dataset {
            years: vec![2000],
            series: Vec::new(),
        };
        viewer.close_then_recreate(dataset.clone());
        assert_eq!(viewer.generation(), 2);
        assert_eq!(viewer.dataset(), Some(&dataset));
    }

    #[test]
    fn test_close() {
        let mut viewer = ChartViewer::new();
        viewer.close_then_recreate(Dataset::default());
        viewer.close();
        assert!(viewer.dataset().is_none());
        assert_eq!(viewer.generation(), 1);
    }
}
