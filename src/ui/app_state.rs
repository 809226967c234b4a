//! # Application State Management
//!
//! This module implements the central `AppState` struct which holds the finished
//! accuracy report and coordinates the rendering of all UI components. It implements
//! the `eframe::App` trait to integrate with the egui application framework.
//!
//! ## Responsibilities
//!
//! - Owns the immutable `AccuracyReport` produced before the window opened
//! - Coordinates rendering of all panels (top, right, chart)
//! - Exports the window contents as PNG through a viewport screenshot
//! - Persists user settings (panel width, table visibility, export directory)
//!
//! ## PNG Export
//!
//! egui delivers screenshots asynchronously: the export path is remembered when
//! the user picks it, a `ViewportCommand::Screenshot` is sent, and the image is
//! written once the matching `Event::Screenshot` arrives in a later frame.

use eframe::egui;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analyzer::AccuracyReport;

/// File name suggested by the export dialog.
const DEFAULT_EXPORT_FILE_NAME: &str = "accuracy_over_time.png";

/// Central application state for the chart window.
pub struct AppState {
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    /// Analysis results being displayed.
    pub report: AccuracyReport,
    /// Log file the report was computed from, for display.
    pub source_path: String,
    /// Whether the per-sample table is shown in the right panel.
    pub show_sample_table: bool,
    /// Width of the right panel in pixels.
    pub right_panel_width: f32,
    /// Last directory used by the export dialog.
    pub last_export_dir: Option<String>,
    /// Destination of a screenshot that has been requested but not yet received.
    pending_export: Option<PathBuf>,
}

/// Settings persisted across application sessions.
#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    right_panel_width: Option<f32>,
    show_sample_table: Option<bool>,
    last_export_dir: Option<String>,
}

impl AppState {
    /// Create a new AppState, loading persisted settings if available.
    ///
    /// # Parameters
    ///
    /// * `report` - Finished analysis to display
    /// * `source_path` - Path of the analysed log, shown in the top panel
    /// * `storage` - Optional persistent storage for loading saved settings
    pub fn new(report: AccuracyReport, source_path: String, storage: Option<&dyn eframe::Storage>) -> Self {
        let persisted: PersistedSettings = storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();

        Self {
            alert: None,
            report,
            source_path,
            show_sample_table: persisted.show_sample_table.unwrap_or(true),
            right_panel_width: persisted.right_panel_width.unwrap_or(380.0),
            last_export_dir: persisted.last_export_dir,
            pending_export: None,
        }
    }

    /// Ask for an export path and request a screenshot of the window.
    ///
    /// If the user cancels the dialog nothing happens.
    pub fn request_export(&mut self, ctx: &egui::Context) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(DEFAULT_EXPORT_FILE_NAME);
        if let Some(dir) = &self.last_export_dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(file) = dialog.save_file() {
            if let Some(parent) = file.parent() {
                self.last_export_dir = Some(parent.to_string_lossy().to_string());
            }
            log::debug!("Requesting screenshot for export to {}", file.display());
            self.pending_export = Some(file);
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        }
    }

    /// Write any screenshot delivered this frame to the pending export path.
    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        if self.pending_export.is_none() {
            return;
        }

        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image: shot, .. } => Some(shot.clone()),
                _ => None,
            })
        });

        if let Some(shot) = screenshot {
            if let Some(path) = self.pending_export.take() {
                match save_png(&shot, &path) {
                    Ok(()) => log::info!("Saved chart to {}", path.display()),
                    Err(e) => {
                        log::error!("{}", e);
                        self.alert = Some(e);
                    }
                }
            }
        }
    }
}

/// Encode an egui image as PNG at `path`.
///
/// # Returns
///
/// `Err` with a user-facing message if the pixel buffer is inconsistent or the
/// file cannot be written.
pub fn save_png(screenshot: &egui::ColorImage, path: &Path) -> Result<(), String> {
    let [width, height] = screenshot.size;
    let bytes: Vec<u8> = screenshot.pixels.iter().flat_map(|pixel| pixel.to_srgba_unmultiplied()).collect();

    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, bytes)
        .ok_or_else(|| format!("Screenshot buffer does not match its size {}x{}", width, height))?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save chart to {}: {}", path.display(), e))
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            right_panel_width: Some(self.right_panel_width),
            show_sample_table: Some(self.show_sample_table),
            last_export_dir: self.last_export_dir.clone(),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshots(ctx);
        if self.pending_export.is_some() {
            // Keep frames coming until the screenshot event shows up
            ctx.request_repaint();
        }

        if self.alert.is_some() {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        if let Some(alert) = &self.alert {
                            ui.label(alert);
                        }
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            self.alert = None;
                        }
                        ui.add_space(10.0);
                    });
                });
        }

        // Panels layout: top (fixed), right (resizable), chart fills the remaining space
        super::top_panel::render(ctx, self);
        super::right_panel::render(ctx, self);
        super::chart::render(ctx, self);
    }
}
