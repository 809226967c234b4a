//! # Right Panel - Class Breakdown and Sample Table
//!
//! This module renders the resizable right panel displaying:
//! - Per-class accuracy for every label in the ground-truth cycle
//! - The complete per-sample table in a scrollable, virtualized table
//!
//! Both tables use `egui_extras::TableBuilder`. The sample table only builds
//! visible rows, so logs with many thousands of samples scroll smoothly.
//! Incorrect samples are shown in red, correct ones in green.

use crate::ui::AppState;
use eframe::egui;
use egui::Color32;

/// Render the right panel.
///
/// The panel width is written back to the state so it can be persisted.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let response = egui::SidePanel::right("breakdown")
        .resizable(true)
        .default_width(state.right_panel_width)
        .width_range(240.0..=900.0)
        .show(ctx, |ui| {
            ui.heading("Per-class accuracy");
            ui.separator();
            render_class_table(ui, state);

            if state.show_sample_table {
                ui.add_space(12.0);
                ui.heading("Samples");
                ui.separator();
                render_sample_table(ui, state);
            }
        });

    state.right_panel_width = response.response.rect.width();
}

/// Render one row per ground-truth class with sample count and hit rate.
fn render_class_table(ui: &mut egui::Ui, state: &AppState) {
    use egui_extras::{Column, TableBuilder};

    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    TableBuilder::new(ui)
        .id_salt("class_table")
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(40.0).at_least(30.0)) // Label
        .column(Column::remainder()) // Name
        .column(Column::initial(60.0).at_least(40.0)) // Samples
        .column(Column::initial(60.0).at_least(40.0)) // Correct
        .column(Column::initial(70.0).at_least(50.0)) // Accuracy
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong("Label");
            });
            header.col(|ui| {
                ui.strong("Class");
            });
            header.col(|ui| {
                ui.strong("Samples");
            });
            header.col(|ui| {
                ui.strong("Correct");
            });
            header.col(|ui| {
                ui.strong("Accuracy");
            });
        })
        .body(|mut body| {
            for class in &state.report.classes {
                body.row(row_height, |mut row| {
                    row.col(|ui| {
                        ui.label(class.label.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&class.name);
                    });
                    row.col(|ui| {
                        ui.label(class.samples.to_string());
                    });
                    row.col(|ui| {
                        ui.label(class.correct.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}%", class.fraction() * 100.0));
                    });
                });
            }
        });
}

/// Render the virtualized per-sample table in log order.
fn render_sample_table(ui: &mut egui::Ui, state: &AppState) {
    use egui_extras::{Column, TableBuilder};

    let report = &state.report;
    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    TableBuilder::new(ui)
        .id_salt("sample_table")
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(60.0).at_least(40.0)) // Index
        .column(Column::initial(70.0).at_least(40.0)) // Prediction
        .column(Column::initial(70.0).at_least(40.0)) // Ground truth
        .column(Column::initial(55.0).at_least(40.0)) // Correct
        .column(Column::remainder()) // Cumulative
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong("Sample");
            });
            header.col(|ui| {
                ui.strong("Predicted");
            });
            header.col(|ui| {
                ui.strong("Expected");
            });
            header.col(|ui| {
                ui.strong("Correct");
            });
            header.col(|ui| {
                ui.strong("Cumulative");
            });
        })
        .body(|body| {
            body.rows(row_height, report.row_count(), |mut row| {
                let i = row.index();
                let hit = report.correct[i] == 1;
                let row_color = if hit { Color32::LIGHT_GREEN } else { Color32::from_rgb(255, 90, 90) };

                row.col(|ui| {
                    ui.label(i.to_string());
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(report.predictions[i].to_string()).color(row_color));
                });
                row.col(|ui| {
                    ui.label(report.ground_truth[i].to_string());
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(if hit { "yes" } else { "no" }).color(row_color));
                });
                row.col(|ui| {
                    ui.label(format!("{:.4}", report.cumulative[i]));
                });
            });
        });
}
