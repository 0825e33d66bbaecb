//! Control Panel Widget
//! Left side panel with the data source, selection, and rollup-segment
//! controls.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::data::RollupBoundary;

/// User-facing settings: the CSV source, the (date, region) selection, and
/// the rollup boundary handed to the loader.
#[derive(Default, Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub date: String,
    pub region: String,
    pub use_marker: bool,
    pub boundary_offset: usize,
    pub boundary_marker: String,
}

impl UserSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let (use_marker, boundary_offset, boundary_marker) = match &config.rollup {
            RollupBoundary::Offset(offset) => (false, *offset, String::new()),
            RollupBoundary::Marker(marker) => (true, 0, marker.clone()),
        };
        Self {
            csv_path: Some(PathBuf::from(&config.csv_path)),
            date: config.date.clone(),
            region: String::new(),
            use_marker,
            boundary_offset,
            boundary_marker,
        }
    }

    /// Rollup boundary as currently configured in the panel.
    pub fn boundary(&self) -> RollupBoundary {
        if self.use_marker {
            RollupBoundary::Marker(self.boundary_marker.clone())
        } else {
            RollupBoundary::Offset(self.boundary_offset)
        }
    }
}

/// Left side control panel with file selection and the render selection.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub regions: Vec<String>,
    pub status: String,
}

impl ControlPanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            settings: UserSettings::from_config(config),
            regions: Vec::new(),
            status: "Ready".to_string(),
        }
    }

    /// Update the region selector after a dataset load. Keeps the current
    /// selection when it still exists, otherwise falls back to the first
    /// region.
    pub fn update_regions(&mut self, regions: Vec<String>) {
        if !regions.contains(&self.settings.region) {
            self.settings.region = regions.first().cloned().unwrap_or_default();
        }
        self.regions = regions;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💉 VaxDash")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Covid-19 Vaccinations in India")
                    .size(11.0)
                    .color(Color32::GRAY),
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
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Selection Section =====
        ui.label(RichText::new("🔎 Selection").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new("Select a date between 25 Jun and 30 August")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(8.0);

        let label_width = 90.0;
        let field_width = 160.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select Date:"));
            ui.add_sized(
                [field_width, 20.0],
                egui::TextEdit::singleline(&mut self.settings.date).hint_text("DD/MM/YYYY"),
            );
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select Region:"));
            ComboBox::from_id_salt("region")
                .width(field_width)
                .selected_text(&self.settings.region)
                .show_ui(ui, |ui| {
                    for region in &self.regions {
                        if ui
                            .selectable_label(self.settings.region == *region, region)
                            .clicked()
                        {
                            self.settings.region = region.clone();
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Rollup Segment Section =====
        ui.label(RichText::new("⚙️ Rollup Segment").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new("Where the nationwide per-date rows start")
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.settings.use_marker, false, "Row offset");
            ui.radio_value(&mut self.settings.use_marker, true, "State marker");
        });

        ui.add_space(5.0);

        if self.settings.use_marker {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Marker:"));
                ui.add_sized(
                    [field_width, 20.0],
                    egui::TextEdit::singleline(&mut self.settings.boundary_marker),
                );
            });
        } else {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Offset:"));
                ui.add(egui::DragValue::new(&mut self.settings.boundary_offset).speed(1));
            });
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button("↻ Reload dataset").clicked() {
                action = ControlPanelAction::Reload;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
}
