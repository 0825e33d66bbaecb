//! VaxDash Main Application
//! Main window wiring the control panel, the dataset, and the dashboard.

use crate::config::AppConfig;
use crate::data::{Dataset, DatasetLoader};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Complete(Dataset),
    Error(String),
}

/// Main application window.
///
/// The dataset is loaded once (and on explicit reload) and never mutated
/// afterwards; every frame recomputes the derived tables from it.
pub struct VaxDashApp {
    control_panel: ControlPanel,
    dashboard: Dashboard,
    dataset: Option<Dataset>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl VaxDashApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load_or_default();
        let mut app = Self {
            control_panel: ControlPanel::new(&config),
            dashboard: Dashboard::new(),
            dataset: None,
            load_rx: None,
            is_loading: false,
        };

        let configured_csv_exists = app
            .control_panel
            .settings
            .csv_path
            .as_ref()
            .map(|path| path.exists())
            .unwrap_or(false);
        if configured_csv_exists {
            app.start_load();
        } else {
            app.control_panel
                .set_status("No dataset. Browse for the CoWIN statewise CSV.");
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.csv_path = Some(path);
            self.start_load();
        }
    }

    /// Load the configured CSV in a background thread
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }
        let Some(path) = self.control_panel.settings.csv_path.clone() else {
            self.control_panel.set_status("No file selected");
            return;
        };

        let boundary = self.control_panel.settings.boundary();
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let path_str = path.to_string_lossy().to_string();
        thread::spawn(move || {
            let result = match DatasetLoader::load_csv(&path_str, &boundary) {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(err) => LoadResult::Error(err.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(dataset) => {
                        self.control_panel.set_status(&format!(
                            "Loaded {} rows, {} regions",
                            dataset.len(),
                            dataset.regions().len()
                        ));
                        self.control_panel.update_regions(dataset.regions().to_vec());
                        self.dataset = Some(dataset);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::warn!("dataset load failed: {}", error);
                        self.control_panel
                            .set_status(&format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for VaxDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.start_load(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard
                .show(ui, self.dataset.as_ref(), &self.control_panel.settings);
        });
    }
}
