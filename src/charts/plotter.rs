//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot, plus raw painter primitives
//! for the pie charts egui_plot has no element for.

use egui::{Align2, Color32, FontId, Pos2, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::data::{Breakdown, VaccinationRecord};

/// Series colors, matching the plotly defaults of the original dashboard
pub const TOTAL_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
pub const FIRST_DOSE_COLOR: Color32 = Color32::from_rgb(239, 85, 59);
pub const SECOND_DOSE_COLOR: Color32 = Color32::from_rgb(0, 204, 150);
pub const SITES_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
pub const SESSIONS_COLOR: Color32 = Color32::from_rgb(64, 224, 208); // turquoise
pub const AGE_BAR_COLOR: Color32 = Color32::from_rgb(128, 0, 128); // purple

pub const PIE_PALETTE: [Color32; 3] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
];

/// Color scale of the statewise chart: dark land to cyan, like the
/// original map
const SCALE_LOW: Color32 = Color32::from_rgb(41, 41, 46);
const SCALE_HIGH: Color32 = Color32::from_rgb(0, 255, 255);

const CHART_HEIGHT: f32 = 260.0;

/// Group digits in threes: 1234567 -> "1,234,567"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Interpolate the statewise color scale; `t` in 0..=1.
fn scale_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(
        lerp(SCALE_LOW.r(), SCALE_HIGH.r()),
        lerp(SCALE_LOW.g(), SCALE_HIGH.g()),
        lerp(SCALE_LOW.b(), SCALE_HIGH.b()),
    )
}

/// Axis formatter for index-positioned categorical values (dates, labels).
/// Non-integer grid marks get no label.
fn index_label_formatter(
    labels: Vec<String>,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let nearest = mark.value.round();
        if (mark.value - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        labels.get(nearest as usize).cloned().unwrap_or_default()
    }
}

fn point_on(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    Pos2::new(
        center.x + radius * angle.cos() as f32,
        center.y + radius * angle.sin() as f32,
    )
}

/// Renders the pipeline's tables as dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Horizontal bars of total doses per state for one date, colored on
    /// the dark-to-cyan scale. Callers pass rows sorted ascending so the
    /// largest state lands at the top of the plot.
    pub fn draw_statewise_bars(ui: &mut egui::Ui, rows: &[(String, u64)]) {
        let max = rows.iter().map(|(_, total)| *total).max().unwrap_or(0).max(1);
        let states: Vec<String> = rows.iter().map(|(state, _)| state.clone()).collect();

        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, (state, total))| {
                Bar::new(i as f64, *total as f64)
                    .width(0.7)
                    .fill(scale_color(*total as f32 / max as f32))
                    .name(state)
            })
            .collect();

        let height = (rows.len() as f32 * 13.0).max(320.0);
        Plot::new("statewise_bars")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Total doses")
            .y_axis_formatter(index_label_formatter(states))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Stacked area of Total / First Dose / Second Dose over the region
    /// series. Layers are drawn top-down so each lower layer paints over
    /// the one above it.
    pub fn draw_trend_area(ui: &mut egui::Ui, series: &[&VaccinationRecord]) {
        let dates: Vec<String> = series.iter().map(|r| r.updated_on.clone()).collect();

        let mut total_layer: Vec<[f64; 2]> = Vec::with_capacity(series.len());
        let mut first_layer: Vec<[f64; 2]> = Vec::with_capacity(series.len());
        let mut second_layer: Vec<[f64; 2]> = Vec::with_capacity(series.len());
        for (i, record) in series.iter().enumerate() {
            let x = i as f64;
            let total = record.total as f64;
            let first = total + record.first_dose as f64;
            let second = first + record.second_dose as f64;
            total_layer.push([x, total]);
            first_layer.push([x, first]);
            second_layer.push([x, second]);
        }

        Plot::new("trend_area")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Date")
            .y_axis_label("Number of doses")
            .x_axis_formatter(index_label_formatter(dates))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(second_layer.iter().copied()))
                        .color(SECOND_DOSE_COLOR)
                        .fill(0.0)
                        .name("Second Dose"),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(first_layer.iter().copied()))
                        .color(FIRST_DOSE_COLOR)
                        .fill(0.0)
                        .name("First Dose"),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(total_layer.iter().copied()))
                        .color(TOTAL_COLOR)
                        .fill(0.0)
                        .name("Total"),
                );
            });
    }

    /// One line over the region series; `value` picks the plotted field.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        id: &str,
        y_label: &str,
        series: &[&VaccinationRecord],
        value: fn(&VaccinationRecord) -> u64,
        color: Color32,
    ) {
        let dates: Vec<String> = series.iter().map(|r| r.updated_on.clone()).collect();
        let points: Vec<[f64; 2]> = series
            .iter()
            .enumerate()
            .map(|(i, record)| [i as f64, value(record) as f64])
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(index_label_formatter(dates))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(1.5),
                );
            });
    }

    /// Vertical bars for a fixed-category breakdown (the age chart).
    pub fn draw_category_bars(ui: &mut egui::Ui, id: &str, breakdown: &Breakdown, color: Color32) {
        let labels: Vec<String> = breakdown
            .entries
            .iter()
            .map(|(label, _)| label.to_string())
            .collect();
        let bars: Vec<Bar> = breakdown
            .entries
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new(i as f64, *value as f64)
                    .width(0.6)
                    .fill(color)
                    .name(*label)
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Age Group")
            .y_axis_label("Number of people")
            .x_axis_formatter(index_label_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Pie (or donut) of a breakdown, labeled percent + value like the
    /// original. egui_plot has no pie element, so the slices are filled by
    /// hand as triangle fans; the donut hole is a center circle painted in
    /// the panel color.
    pub fn draw_pie(ui: &mut egui::Ui, breakdown: &Breakdown, donut: bool) {
        let total = breakdown.total();
        let (response, painter) = ui.allocate_painter(
            egui::vec2(ui.available_width(), CHART_HEIGHT),
            egui::Sense::hover(),
        );
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.33;

        if total == 0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No doses recorded",
                FontId::proportional(13.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (i, (_, value)) in breakdown.entries.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let fraction = *value as f64 / total as f64;
            let sweep = fraction * std::f64::consts::TAU;
            let color = PIE_PALETTE[i % PIE_PALETTE.len()];

            // Triangle fan in ~3 degree steps; a single polygon would not
            // stay convex past half a turn.
            let steps = (sweep / 0.05).ceil().max(1.0) as usize;
            let mut prev = point_on(center, radius, start);
            for step in 1..=steps {
                let angle = start + sweep * step as f64 / steps as f64;
                let next = point_on(center, radius, angle);
                painter.add(egui::Shape::convex_polygon(
                    vec![center, prev, next],
                    color,
                    Stroke::NONE,
                ));
                prev = next;
            }

            let mid = start + sweep / 2.0;
            painter.text(
                point_on(center, radius * 1.28, mid),
                Align2::CENTER_CENTER,
                format!("{:.1}% {}", fraction * 100.0, format_count(*value)),
                FontId::proportional(12.0),
                ui.visuals().text_color(),
            );
            start += sweep;
        }

        if donut {
            painter.circle_filled(center, radius * 0.4, ui.visuals().panel_fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_groups_digits() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn scale_color_endpoints() {
        assert_eq!(scale_color(0.0), SCALE_LOW);
        assert_eq!(scale_color(1.0), SCALE_HIGH);
        assert_eq!(scale_color(-1.0), SCALE_LOW);
        assert_eq!(scale_color(2.0), SCALE_HIGH);
    }

    #[test]
    fn index_labels_only_on_integer_marks() {
        let formatter = index_label_formatter(vec!["a".to_string(), "b".to_string()]);
        let mark = |value| egui_plot::GridMark {
            value,
            step_size: 1.0,
        };
        let range = 0.0..=1.0;
        assert_eq!(formatter(mark(0.0), &range), "a");
        assert_eq!(formatter(mark(1.0), &range), "b");
        assert_eq!(formatter(mark(0.5), &range), "");
        assert_eq!(formatter(mark(5.0), &range), "");
        assert_eq!(formatter(mark(-1.0), &range), "");
    }
}
