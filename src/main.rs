use anyhow::Context;
use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, error, info};
use std::path::Path;

use crate::analyzer::AccuracyReport;
use crate::config::ViewerConfig;
use crate::ui::AppState;

mod analyzer;
mod config;
mod ui;

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("prediction_accuracy_viewer"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load, analyse and display the performance log.
///
/// Every failure before the window opens is fatal, so no chart is shown for
/// unreadable or empty input.
fn run() -> anyhow::Result<()> {
    let config = ViewerConfig::load_or_default(Path::new(config::CONFIG_FILE_NAME)).context("Failed to load configuration")?;

    let records = analyzer::load_log(&config.log_path)
        .with_context(|| format!("Failed to load performance log {}", config.log_path.display()))?;

    let report = analyzer::analyze(&records, &config).context("Failed to analyse performance log")?;
    info!("{} over {} samples", report.final_accuracy_label(), report.row_count());

    show_chart(report, &config)
}

/// Open the chart window and block until it is closed.
fn show_chart(report: AccuracyReport, config: &ViewerConfig) -> anyhow::Result<()> {
    let source_path = config.log_path.display().to_string();

    // Start the GUI on the main thread (required on macOS)
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([1280.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        native_options,
        Box::new(move |cc| Ok(Box::new(AppState::new(report, source_path, cc.storage)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to open chart window: {}", e))
}
