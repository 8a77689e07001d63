//! Control Panel Widget
//! Left side panel: zone selection, export buttons and status.

use crate::data::zones::{zone_options, ALL_ZONES_LABEL};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel.
pub struct ControlPanel {
    pub data_path: PathBuf,
    pub zones: Vec<String>,
    pub selected_zone: Option<String>,
    pub status: String,
    pub busy: bool,
}

impl ControlPanel {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            zones: Vec::new(),
            selected_zone: None,
            status: "Ready".to_string(),
            busy: false,
        }
    }

    /// Replace the dropdown entries after a load.
    pub fn update_zones(&mut self, zones: Vec<String>) {
        self.zones = zones;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Population mondiale")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = self
                    .data_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.data_path.display().to_string());
                ui.label(RichText::new(file_name).size(12.0));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Zone Section =====
        ui.label(RichText::new("🗺 Zone").size(14.0).strong());
        ui.add_space(5.0);

        let selected_text = self
            .selected_zone
            .clone()
            .unwrap_or_else(|| ALL_ZONES_LABEL.to_string());

        ComboBox::from_id_salt("zone_dropdown")
            .width(220.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (label, value) in zone_options(&self.zones) {
                    if ui
                        .selectable_label(self.selected_zone == value, label)
                        .clicked()
                        && self.selected_zone != value
                    {
                        self.selected_zone = value;
                        action = ControlPanelAction::ZoneChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("⬇ Télécharger les données").size(14.0))
                .min_size(egui::vec2(200.0, 32.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Download;
            }

            ui.add_space(8.0);

            let image_button = egui::Button::new(RichText::new("🖼 Save Chart PNG").size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add(image_button).clicked() {
                action = ControlPanelAction::SaveChartImage;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ZoneChanged,
    Download,
    SaveChartImage,
}
