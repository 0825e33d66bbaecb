//! VaxDash - COVID-19 Vaccination Dashboard for India
//!
//! Loads the CoWIN statewise CSV export and renders an interactive
//! dashboard of vaccinations by state and date.

mod charts;
mod config;
mod data;
mod gui;

use eframe::egui;
use gui::VaxDashApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Covid-19 Vaccinations in India"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "VaxDash",
        options,
        Box::new(|cc| Ok(Box::new(VaxDashApp::new(cc)))),
    )
}
