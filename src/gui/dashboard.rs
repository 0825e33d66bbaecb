//! Dashboard Widget
//! Central scrollable panel: the statewise chart, the metrics row, and the
//! per-region chart grid for the current selection.

use egui::{Color32, RichText, ScrollArea, Stroke};

use crate::charts::{
    format_count, ChartPlotter, AGE_BAR_COLOR, PIE_PALETTE, SESSIONS_COLOR, SITES_COLOR,
};
use crate::data::{Breakdown, Dataset, Pipeline, VaccinationRecord};
use crate::gui::control_panel::UserSettings;

/// Scrollable dashboard area. Every derived table is recomputed from the
/// dataset and the current selection on each pass; nothing is cached.
pub struct Dashboard;

impl Dashboard {
    pub fn new() -> Self {
        Self
    }

    /// Draw the dashboard for the current selection.
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: Option<&Dataset>, settings: &UserSettings) {
        let Some(dataset) = dataset else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        // Derived tables for this render pass
        let series = Pipeline::region_series(dataset, &settings.region);
        let snapshot = Pipeline::region_snapshot(dataset, &settings.region, &settings.date);
        let nationwide = Pipeline::nationwide_snapshot(dataset, &settings.date);

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(5.0);
                ui.label(
                    RichText::new("Covid-19 Vaccinations in India")
                        .size(24.0)
                        .strong(),
                );
                ui.label(RichText::new("By Aganya Bajaj").size(13.0).color(Color32::GRAY));
            });
            ui.add_space(10.0);

            // Statewise snapshot over the rollup segment, full width
            Self::chart_card(ui, "Statewise Map of Vaccinations", |ui| match &nationwide {
                Ok(rows) if !rows.is_empty() => {
                    let mut table: Vec<(String, u64)> =
                        rows.iter().map(|r| (r.state.clone(), r.total)).collect();
                    // ascending, so the largest state lands on top
                    table.sort_by_key(|(_, total)| *total);
                    ChartPlotter::draw_statewise_bars(ui, &table);
                }
                _ => Self::no_data_notice(ui, &settings.date),
            });
            ui.add_space(10.0);

            // Metrics for the selected region and date
            match &snapshot {
                Ok(snap) => Self::metrics_row(ui, snap),
                Err(_) => Self::no_data_banner(ui, settings),
            }
            ui.add_space(10.0);

            let breakdowns = snapshot.as_ref().ok().map(|snap| {
                (
                    Pipeline::brand_breakdown(snap),
                    Pipeline::gender_breakdown(snap),
                    Pipeline::age_breakdown(snap),
                )
            });

            ui.columns(2, |cols| {
                Self::chart_card(&mut cols[0], "Vaccination trend over time", |ui| {
                    ChartPlotter::draw_trend_area(ui, &series);
                });
                Self::chart_card(&mut cols[1], "Vaccine Brand Used", |ui| {
                    match &breakdowns {
                        Some((brand, _, _)) => Self::pie_with_legend(ui, brand, false),
                        None => Self::no_data_notice(ui, &settings.date),
                    }
                });
            });
            ui.add_space(10.0);

            ui.columns(2, |cols| {
                Self::chart_card(&mut cols[0], "Gender Ratio of vaccinated people", |ui| {
                    match &breakdowns {
                        Some((_, gender, _)) => Self::pie_with_legend(ui, gender, true),
                        None => Self::no_data_notice(ui, &settings.date),
                    }
                });
                Self::chart_card(&mut cols[1], "Trend on Age Group", |ui| match &breakdowns {
                    Some((_, _, age)) => {
                        ChartPlotter::draw_category_bars(ui, "age_bars", age, AGE_BAR_COLOR)
                    }
                    None => Self::no_data_notice(ui, &settings.date),
                });
            });
            ui.add_space(10.0);

            ui.columns(2, |cols| {
                Self::chart_card(&mut cols[0], "Number of centers over time", |ui| {
                    ChartPlotter::draw_line_chart(
                        ui,
                        "sites_line",
                        "Centers",
                        &series,
                        |r| r.sites,
                        SITES_COLOR,
                    );
                });
                Self::chart_card(&mut cols[1], "Sessions conducted over time", |ui| {
                    ChartPlotter::draw_line_chart(
                        ui,
                        "sessions_line",
                        "Sessions",
                        &series,
                        |r| r.sessions,
                        SESSIONS_COLOR,
                    );
                });
            });
            ui.add_space(15.0);
        });
    }

    /// Three scalar metric cards from the region snapshot.
    fn metrics_row(ui: &mut egui::Ui, snapshot: &VaccinationRecord) {
        let metrics = [
            ("Total", snapshot.total),
            ("First Dose", snapshot.first_dose),
            ("Second Dose", snapshot.second_dose),
        ];
        ui.columns(3, |cols| {
            for (col, (label, value)) in cols.iter_mut().zip(metrics) {
                egui::Frame::none()
                    .fill(col.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(col, |ui| {
                        ui.set_width(ui.available_width());
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                            ui.label(RichText::new(format_count(value)).size(24.0).strong());
                        });
                    });
            }
        });
    }

    /// User-facing notice when the selection has no matching record.
    fn no_data_banner(ui: &mut egui::Ui, settings: &UserSettings) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "No data for {} in {}. Try another date.",
                            settings.date, settings.region
                        ))
                        .size(14.0)
                        .color(Color32::from_rgb(247, 200, 67)),
                    );
                });
            });
    }

    fn no_data_notice(ui: &mut egui::Ui, date: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(
                RichText::new(format!("No data for {}", date))
                    .size(13.0)
                    .color(Color32::GRAY),
            );
            ui.add_space(30.0);
        });
    }

    /// Pie chart with the horizontal swatch legend above it.
    fn pie_with_legend(ui: &mut egui::Ui, breakdown: &Breakdown, donut: bool) {
        ui.horizontal(|ui| {
            for (i, (label, _)) in breakdown.entries.iter().enumerate() {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, 2.0, PIE_PALETTE[i % PIE_PALETTE.len()]);
                ui.label(RichText::new(*label).size(12.0));
                ui.add_space(10.0);
            }
        });
        ChartPlotter::draw_pie(ui, breakdown, donut);
    }

    /// Framed card with a centered title, the way every chart is boxed.
    fn chart_card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        let stroke_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
        egui::Frame::none()
            .rounding(8.0)
            .stroke(Stroke::new(1.0, stroke_color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).size(15.0).strong());
                });
                ui.add_space(6.0);
                add_contents(ui);
            });
    }
}
