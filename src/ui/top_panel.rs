//! # Top Panel - Summary Metrics and Controls
//!
//! This module renders the fixed-height top panel displaying:
//! - Column 1: Accuracy metrics (samples, correct predictions, final accuracy)
//! - Column 2: Input details (source file, dropped rows, processing latency)
//! - Column 3: Controls (sample table toggle, PNG export)

use crate::ui::AppState;
use eframe::egui;

/// Render the top panel with metrics and controls.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state for reading metrics and updating controls
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_summary").exact_height(110.0).show(ctx, |ui| {
        ui.columns(3, |cols| {
            cols[0].vertical(|ui| {
                render_accuracy_metrics(ui, state);
            });

            cols[1].vertical(|ui| {
                render_input_details(ui, state);
            });

            cols[2].vertical(|ui| {
                render_controls(ui, state);
            });
        });
    });
}

fn render_accuracy_metrics(ui: &mut egui::Ui, state: &AppState) {
    let report = &state.report;

    ui.heading("Accuracy");
    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Samples:");
        ui.label(egui::RichText::new(format!("{:<8}", report.row_count())).monospace().strong());
        ui.label("Correct:");
        ui.label(egui::RichText::new(report.correct_count().to_string()).monospace().strong());
    });
    ui.horizontal(|ui| {
        ui.label("Final accuracy:");
        ui.label(egui::RichText::new(format!("{:.2}", report.accuracy_percent())).strong());
        ui.label("%");
    });
}

fn render_input_details(ui: &mut egui::Ui, state: &AppState) {
    let report = &state.report;

    ui.heading("Input");
    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Log file:");
        ui.label(egui::RichText::new(&state.source_path).monospace());
    });

    if report.dropped_rows > 0 {
        ui.horizontal(|ui| {
            ui.label("Dropped rows:");
            ui.label(egui::RichText::new(report.dropped_rows.to_string()).strong().color(egui::Color32::YELLOW));
        });
    }

    match report.processing {
        Some(stats) => {
            ui.horizontal(|ui| {
                ui.label("Processing time:");
                ui.label(egui::RichText::new(format!("{:.3}", stats.mean_ms)).strong());
                ui.label("ms avg,");
                ui.label(egui::RichText::new(format!("{:.3}", stats.max_ms)).strong());
                ui.label(format!("ms max ({} samples)", stats.samples));
            });
        }
        None => {
            ui.label("Processing time: not logged");
        }
    }
}

fn render_controls(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();
    ui.checkbox(&mut state.show_sample_table, "Show sample table");
    if ui.button("Save PNG…").clicked() {
        let ctx = ui.ctx().clone();
        state.request_export(&ctx);
    }
}
