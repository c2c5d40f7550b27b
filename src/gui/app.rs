//! Waste Dashboard Main Application
//! Main window with control panel and dashboard viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};
use waste_dashboard::charts::ChartRenderer;
use waste_dashboard::config::AppConfig;
use waste_dashboard::{report, DashboardPipeline, DatasetSource, YearRange};

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(DashboardPipeline),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    pipeline: Option<DashboardPipeline>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    /// Range to apply once the pending load completes
    pending_range: YearRange,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            pending_range: config.initial_range(),
            config,
            pipeline: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        let data_path = app.config.data_path.clone();
        app.start_load(data_path);
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
            self.pending_range = YearRange::all();
            self.start_load(path);
        }
    }

    /// Load a dataset in a background thread
    fn start_load(&mut self, path: PathBuf) {
        // One dataset at a time: a new file replaces the current one
        self.chart_viewer.clear();
        self.pipeline = None;
        self.control_panel.export_enabled = false;
        self.control_panel.update_years(Vec::new());
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_progress(5.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let preview_rows = self.config.preview_rows;

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let pipeline = DashboardPipeline::new(DatasetSource::new(path), preview_rows);
            match pipeline.dataset() {
                Ok(_) => {
                    let _ = tx.send(LoadResult::Complete(pipeline));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(30.0, &status);
                    }
                    LoadResult::Complete(pipeline) => {
                        info!(path = %pipeline.source().path().display(), "dataset ready");
                        self.pipeline = Some(pipeline);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        let range = self.pending_range;
                        self.refresh(range);
                    }
                    LoadResult::Error(message) => {
                        error!(%message, "dataset load failed");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", message));
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

    /// Run the pipeline for `range` and show the result
    fn refresh(&mut self, range: YearRange) {
        let Some(pipeline) = &self.pipeline else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };

        match pipeline.run(range) {
            Ok(report) => {
                let applied = YearRange::new(report.year_from, report.year_to);
                self.control_panel.update_years(report.years.clone());
                self.control_panel.set_range(applied);
                self.control_panel.export_enabled = true;

                let status = if !range.is_unbounded() && !report.filter_applied {
                    warn!(from = ?range.from, to = ?range.to, "no rows in requested range");
                    "Complete! No rows in that range, showing all years".to_string()
                } else {
                    format!(
                        "Complete! {} months, {}",
                        report.series.trend.periods().len(),
                        report.summary.period_label
                    )
                };
                self.control_panel.set_progress(100.0, &status);
                self.chart_viewer.set_report(report);
            }
            Err(e) => {
                error!(error = %e, "pipeline failed");
                self.chart_viewer.clear();
                self.control_panel.export_enabled = false;
                self.control_panel.set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Render the three charts to PNG in the export directory
    fn handle_export_charts(&mut self) {
        let Some(report) = &self.chart_viewer.report else {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        };

        self.control_panel.set_progress(50.0, "Rendering charts...");
        let dir = self.config.export_dir.clone();

        match ChartRenderer::export_all(
            &report.series,
            &dir,
            self.config.chart_width,
            self.config.chart_height,
        ) {
            Ok(paths) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} charts to {}", paths.len(), dir.display()),
                );
                if let Err(e) = open::that(&dir) {
                    warn!(error = %e, "could not open export directory");
                }
            }
            Err(e) => {
                error!(error = %format!("{:#}", e), "chart export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {:#}", e));
            }
        }
    }

    /// Save the current report as JSON
    fn handle_export_report(&mut self) {
        let Some(report) = &self.chart_viewer.report else {
            self.control_panel.set_progress(0.0, "No report to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_directory(&self.config.export_dir)
            .set_file_name("waste_report.json")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match report::write_json(report, &output_path) {
            Ok(()) => self.control_panel.set_progress(
                100.0,
                &format!("Exported report to {}", output_path.display()),
            ),
            Err(e) => {
                error!(error = %e, "report export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
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
                        ControlPanelAction::ApplyFilter => {
                            let range = self.control_panel.settings.range();
                            self.refresh(range);
                        }
                        ControlPanelAction::ResetFilter => self.refresh(YearRange::all()),
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::ExportReport => self.handle_export_report(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
