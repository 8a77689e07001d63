//! Population Viewer Main Application
//! Main window with control panel, line chart and zone map.

use crate::charts::{ColorSource, StaticChartRenderer};
use crate::config::AppConfig;
use crate::data::{zones, DataLoader, Exporter, Record, SeriesBuilder};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::map::{build_markers, MapViewer};
use egui::{RichText, SidePanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete(Vec<Record>),
    Error(String),
}

/// What to do with the records once a load finishes.
#[derive(Debug, Clone)]
enum LoadPurpose {
    /// First load: fill the zone dropdown, build the map and draw the chart.
    Startup,
    /// Rebuild the chart for a zone selection.
    Redraw { zone: Option<String> },
    /// Write the records matching `zone` to `path`.
    Export { zone: Option<String>, path: PathBuf },
}

struct PendingLoad {
    purpose: LoadPurpose,
    rx: Receiver<LoadResult>,
}

/// Main application window.
pub struct PopulationApp {
    config: AppConfig,
    loader: DataLoader,
    colors: ColorSource,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    map_viewer: Option<MapViewer>,

    // Loads still in flight; results are applied in arrival order
    pending: Vec<PendingLoad>,
}

impl PopulationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, zone: Option<String>) -> Self {
        let mut app = Self::with_config(config);
        app.control_panel.selected_zone = zone;
        app.spawn_load(LoadPurpose::Startup);
        app
    }

    fn with_config(config: AppConfig) -> Self {
        Self {
            loader: DataLoader::new(config.data_path.clone()),
            colors: ColorSource::from_seed(config.color_seed),
            control_panel: ControlPanel::new(config.data_path.clone()),
            chart_viewer: ChartViewer::new(),
            map_viewer: None,
            pending: Vec::new(),
            config,
        }
    }

    /// Read the data file on a worker thread.
    fn spawn_load(&mut self, purpose: LoadPurpose) {
        let (tx, rx) = channel();
        let loader = self.loader.clone();

        info!(?purpose, path = %loader.file_path().display(), "loading data");
        thread::spawn(move || {
            let result = match loader.load() {
                Ok(records) => LoadResult::Complete(records),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });

        self.pending.push(PendingLoad { purpose, rx });
        self.control_panel.busy = true;
        self.control_panel.set_status("Loading data...");
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        for load in std::mem::take(&mut self.pending) {
            match load.rx.try_recv() {
                Ok(LoadResult::Complete(records)) => self.apply_records(load.purpose, records),
                Ok(LoadResult::Error(message)) => {
                    error!(%message, "data load failed");
                    self.control_panel
                        .set_status(&format!("Error: {}", message));
                }
                Err(TryRecvError::Empty) => self.pending.push(load),
                Err(TryRecvError::Disconnected) => {
                    error!("data loader thread exited without a result");
                    self.control_panel.set_status("Error: loader stopped");
                }
            }
        }
        self.control_panel.busy = !self.pending.is_empty();
    }

    fn apply_records(&mut self, purpose: LoadPurpose, records: Vec<Record>) {
        match purpose {
            LoadPurpose::Startup => {
                self.control_panel
                    .update_zones(zones::distinct_zones(&records));
                self.map_viewer = Some(MapViewer::new(build_markers(&records)));
                let zone = self.control_panel.selected_zone.clone();
                self.redraw(&records, zone.as_deref());
            }
            LoadPurpose::Redraw { zone } => self.redraw(&records, zone.as_deref()),
            LoadPurpose::Export { zone, path } => {
                match Exporter::write(&records, zone.as_deref(), &path) {
                    Ok(count) => self.control_panel.set_status(&format!(
                        "Exported {} rows to {}",
                        count,
                        path.display()
                    )),
                    Err(e) => {
                        error!(error = %e, "export failed");
                        self.control_panel.set_status(&format!("Error: {}", e));
                    }
                }
            }
        }
    }

    fn redraw(&mut self, records: &[Record], zone: Option<&str>) {
        let dataset = SeriesBuilder::build(records, zone, &self.colors);
        let status = format!(
            "{} records, {} series, {} years",
            records.len(),
            dataset.series.len(),
            dataset.years.len()
        );
        self.chart_viewer.close_then_recreate(dataset);
        self.control_panel.set_status(&status);
    }

    /// Ask where to save, then reload and export the current selection.
    fn handle_download(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(self.config.export_file_name.as_str())
            .save_file()
        else {
            return; // User cancelled
        };

        let zone = self.control_panel.selected_zone.clone();
        self.spawn_load(LoadPurpose::Export { zone, path });
    }

    /// Render the chart currently shown to a PNG.
    fn handle_save_chart_image(&mut self) {
        let Some(dataset) = self.chart_viewer.dataset().cloned() else {
            self.control_panel.set_status("No chart to save");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("population_chart.png")
            .save_file()
        else {
            return;
        };

        let [width, height] = self.config.image_size;
        match StaticChartRenderer::render_png(&dataset, &path, width, height) {
            Ok(()) => self
                .control_panel
                .set_status(&format!("Chart saved to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "chart image not saved");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for PopulationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if !self.pending.is_empty() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui);

                match action {
                    ControlPanelAction::ZoneChanged => {
                        let zone = self.control_panel.selected_zone.clone();
                        self.spawn_load(LoadPurpose::Redraw { zone });
                    }
                    ControlPanelAction::Download => self.handle_download(),
                    ControlPanelAction::SaveChartImage => self.handle_save_chart_image(),
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - chart above the map
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(RichText::new("Population par zone").size(18.0).strong());
                    ui.add_space(8.0);
                    self.chart_viewer.show(ui);

                    ui.add_space(15.0);
                    ui.separator();
                    ui.label(RichText::new("Carte des zones").size(18.0).strong());
                    ui.add_space(8.0);
                    match &mut self.map_viewer {
                        Some(map) => map.show(ui),
                        None => {
                            ui.label("Loading map...");
                        }
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn write_data(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("population_monde.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "Zone,Annee,Population\nEurope,2000,700.5\nAsie,2000,3700\nMars,2020,5.0\nEurope,2010,735\n"
        )
        .unwrap();
        path
    }

    fn app_for(path: PathBuf) -> PopulationApp {
        PopulationApp::with_config(AppConfig {
            data_path: path,
            color_seed: Some(1),
            ..AppConfig::default()
        })
    }

    fn wait_for_loads(app: &mut PopulationApp) {
        for _ in 0..200 {
            app.check_load_results();
            if app.pending.is_empty() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("loads did not finish");
    }

    #[test]
    fn test_startup_load_fills_zones_map_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(write_data(&dir));

        app.spawn_load(LoadPurpose::Startup);
        wait_for_loads(&mut app);

        assert_eq!(app.control_panel.zones, vec!["Europe", "Asie", "Mars"]);
        let map = app.map_viewer.as_ref().unwrap();
        assert_eq!(map.markers().len(), 2);

        let dataset = app.chart_viewer.dataset().unwrap();
        assert_eq!(dataset.years, vec![2000, 2010, 2020]);
        assert_eq!(dataset.series.len(), 3);
        assert!(!app.control_panel.busy);
    }

    #[test]
    fn test_redraw_recreates_chart_for_zone() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(write_data(&dir));

        app.spawn_load(LoadPurpose::Startup);
        wait_for_loads(&mut app);
        let before = app.chart_viewer.generation();

        app.spawn_load(LoadPurpose::Redraw {
            zone: Some("Europe".to_string()),
        });
        wait_for_loads(&mut app);

        assert_eq!(app.chart_viewer.generation(), before + 1);
        let dataset = app.chart_viewer.dataset().unwrap();
        assert_eq!(dataset.series.len(), 1);
        assert_eq!(dataset.series[0].label, "Europe");
        assert_eq!(dataset.series[0].points, vec![700.5, 735.0]);
    }

    #[test]
    fn test_export_load_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(write_data(&dir));
        let out = dir.path().join("population_data.csv");

        app.spawn_load(LoadPurpose::Export {
            zone: Some("Asie".to_string()),
            path: out.clone(),
        });
        wait_for_loads(&mut app);

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content, "Zone géographique,Année,Population\nAsie,2000,3700");
    }

    #[test]
    fn test_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(dir.path().join("absent.csv"));

        app.spawn_load(LoadPurpose::Startup);
        wait_for_loads(&mut app);

        assert!(app.control_panel.status.starts_with("Error"));
        assert!(app.chart_viewer.dataset().is_none());
    }
}
