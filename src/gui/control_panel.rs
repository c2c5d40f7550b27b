//! Control Panel Widget
//! Left side panel with data source, year range and export controls.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;
use waste_dashboard::YearRange;

/// User selections
#[derive(Default, Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

impl UserSettings {
    pub fn range(&self) -> YearRange {
        YearRange::new(self.year_from, self.year_to)
    }
}

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub years: Vec<i32>,
    pub progress: f32,
    pub status: String,
    pub filter_enabled: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            years: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            filter_enabled: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update selectable years after a dataset load
    pub fn update_years(&mut self, years: Vec<i32>) {
        self.filter_enabled = !years.is_empty();
        self.years = years;
    }

    /// Show the bounds that are actually in effect
    pub fn set_range(&mut self, range: YearRange) {
        self.settings.year_from = range.from;
        self.settings.year_to = range.to;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("♻ Waste Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(25, 135, 84)),
            );
            ui.label(
                RichText::new("Monthly generation & policy scenarios")
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

        // ===== Year Range Section =====
        ui.label(RichText::new("📅 Year Range").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 80.0;
        let combo_width = 150.0;

        ui.add_enabled_ui(self.filter_enabled, |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("From:"));
                Self::year_combo(
                    ui,
                    "year_from",
                    &self.years,
                    &mut self.settings.year_from,
                    combo_width,
                );
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("To:"));
                Self::year_combo(
                    ui,
                    "year_to",
                    &self.years,
                    &mut self.settings.year_to,
                    combo_width,
                );
            });

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let apply = egui::Button::new(RichText::new("▶ Apply").size(14.0))
                    .min_size(egui::vec2(110.0, 30.0));
                if ui.add(apply).clicked() {
                    action = ControlPanelAction::ApplyFilter;
                }
                if ui
                    .add(egui::Button::new("Reset").min_size(egui::vec2(80.0, 30.0)))
                    .clicked()
                {
                    action = ControlPanelAction::ResetFilter;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let charts_button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(charts_button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }

                ui.add_space(8.0);

                let report_button = egui::Button::new(RichText::new("📄 Export Report").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(report_button).clicked() {
                    action = ControlPanelAction::ExportReport;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn year_combo(
        ui: &mut egui::Ui,
        id: &str,
        years: &[i32],
        selected: &mut Option<i32>,
        width: f32,
    ) {
        let selected_text = selected.map_or_else(|| "All".to_string(), |y| y.to_string());
        ComboBox::from_id_salt(id)
            .width(width)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(selected, None, "All");
                for &year in years {
                    ui.selectable_value(selected, Some(year), year.to_string());
                }
            });
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ApplyFilter,
    ResetFilter,
    ExportCharts,
    ExportReport,
}
