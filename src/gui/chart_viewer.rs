//! Chart Viewer Widget
//! Central scrollable panel: summary cards, insights, the three charts and
//! the table preview.

use egui::{Color32, RichText, ScrollArea};
use waste_dashboard::charts::ChartPlotter;
use waste_dashboard::DashboardReport;

const SECTION_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 280.0;

/// Scrollable dashboard display area.
#[derive(Default)]
pub struct ChartViewer {
    pub report: Option<DashboardReport>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.report = None;
    }

    pub fn set_report(&mut self, report: DashboardReport) {
        self.report = Some(report);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("Period {}", report.summary.period_label))
                            .size(18.0)
                            .strong(),
                    );
                    if !report.filter_applied {
                        ui.label(
                            RichText::new("(all years)")
                                .size(12.0)
                                .color(Color32::GRAY),
                        );
                    }
                });
                ui.add_space(8.0);

                ChartPlotter::draw_summary_cards(ui, &report.summary);
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("💡 Insights").size(15.0).strong());
                for insight in &report.insights {
                    ui.label(format!("• {}", insight));
                }
                ui.add_space(SECTION_SPACING);

                for (_, chart) in report.series.charts() {
                    egui::Frame::none()
                        .rounding(8.0)
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ChartPlotter::draw_series_chart(ui, chart, CHART_HEIGHT);
                        });
                    ui.add_space(SECTION_SPACING);
                }

                ui.label(
                    RichText::new(format!("📋 Latest {} months", report.preview.len()))
                        .size(15.0)
                        .strong(),
                );
                ui.add_space(5.0);
                ChartPlotter::draw_preview_table(ui, &report.preview);
            });
    }
}
