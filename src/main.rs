//! Waste Dashboard - Monthly waste generation & policy scenario viewer
//!
//! Desktop front end over the `waste_dashboard` pipeline. The first
//! command-line argument, when given, replaces the configured CSV path.

mod gui;

use anyhow::Context;
use eframe::egui;
use gui::DashboardApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waste_dashboard::config::AppConfig;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("failed to load dashboard.toml")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = path.into();
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!(data = %config.data_path.display(), "starting waste dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Waste Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Waste Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
