// UI module for the prediction accuracy viewer
//
// This module organizes the window into separate components:
// - `top_panel`: Summary metrics and controls
// - `right_panel`: Per-class and per-sample tables
// - `chart`: Central cumulative accuracy chart
// - `app_state`: Application state, PNG export and the main update loop

pub mod app_state;
pub mod chart;
pub mod right_panel;
pub mod top_panel;

pub use app_state::AppState;
