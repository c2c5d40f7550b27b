//! Chart Plotter Module
//! Draws the dashboard charts, summary cards and preview table with egui.

use super::series::{hex_to_rgb, month_index, month_index_label, ChartSeries};
use crate::data::Record;
use crate::stats::format::format_number;
use crate::stats::SummaryResult;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

/// Accent colors for the summary cards
pub const CARD_COLORS: [Color32; 4] = [
    Color32::from_rgb(13, 110, 253),  // Blue
    Color32::from_rgb(255, 193, 7),   // Amber
    Color32::from_rgb(220, 53, 69),   // Red
    Color32::from_rgb(25, 135, 84),   // Green
];

/// Draws dashboard widgets.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn trace_color(hex: &str) -> Color32 {
        let (r, g, b) = hex_to_rgb(hex);
        Color32::from_rgb(r, g, b)
    }

    /// Draw a line chart for one series.
    /// X-axis: month index with `YYYY-MM` labels, Y-axis: tons
    pub fn draw_series_chart(ui: &mut egui::Ui, series: &ChartSeries, height: f32) {
        ui.label(RichText::new(&series.title).size(15.0).strong());

        Plot::new(format!("series_{}", series.title))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(series.x_label.clone())
            .y_axis_label(series.y_label.clone())
            .x_axis_formatter(|mark, _range| {
                // Only whole months get a label
                if (mark.value - mark.value.round()).abs() < 1e-6 {
                    month_index_label(mark.value.round() as i32)
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(|mark, _range| format_number(mark.value))
            .show(ui, |plot_ui| {
                for trace in &series.traces {
                    let color = Self::trace_color(trace.color);
                    let points: Vec<[f64; 2]> = trace
                        .points
                        .iter()
                        .map(|p| [month_index(p.period) as f64, p.value])
                        .collect();

                    let mut line = Line::new(PlotPoints::from(points.clone()))
                        .color(color)
                        .width(2.0)
                        .name(&trace.name);
                    if trace.dashed {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    plot_ui.line(line);

                    if trace.markers {
                        plot_ui.points(
                            Points::new(PlotPoints::from(points))
                                .radius(3.0)
                                .color(color)
                                .name(&trace.name),
                        );
                    }
                }
            });
    }

    /// Draw the four headline figures side by side.
    pub fn draw_summary_cards(ui: &mut egui::Ui, summary: &SummaryResult) {
        let cards = [
            ("Total generated", &summary.total_generated.display),
            ("Average handled", &summary.mean_handled.display),
            ("Remaining (last month)", &summary.remaining_last.display),
            ("Accumulation (last month)", &summary.accumulation_last.display),
        ];

        ui.horizontal_wrapped(|ui| {
            for ((title, value), color) in cards.iter().zip(CARD_COLORS.iter()) {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(2.0, *color))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.set_min_width(200.0);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(*title).size(12.0).color(Color32::GRAY));
                            ui.label(
                                RichText::new(value.as_str())
                                    .size(20.0)
                                    .strong()
                                    .color(*color),
                            );
                        });
                    });
                ui.add_space(8.0);
            }
        });
    }

    /// Draw the most recent rows as a striped table, oldest first.
    pub fn draw_preview_table(ui: &mut egui::Ui, rows: &[Record]) {
        const HEADERS: [&str; 10] = [
            "Period",
            "Year",
            "Month",
            "Generated",
            "Handled (est.)",
            "Remaining",
            "Accumulation",
            "BAU",
            "Scenario 70%",
            "Scenario 80%",
        ];

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("preview_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for header in HEADERS {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for r in rows {
                            let period = r.period.format("%Y-%m").to_string();
                            ui.label(RichText::new(period).size(11.0));
                            ui.label(RichText::new(r.year.to_string()).size(11.0));
                            ui.label(RichText::new(&r.month).size(11.0));
                            for value in [
                                r.amount_generated,
                                r.amount_handled_estimate,
                                r.amount_remaining,
                                r.accumulation,
                                r.scenario_bau,
                                r.scenario_70,
                                r.scenario_80,
                            ] {
                                ui.label(RichText::new(format_number(value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
