//! Analyzer module for performance log loading and accuracy computation.
//!
//! Provides functionality for:
//! - Reading the classifier's performance log in row order
//! - Deriving ground truth from the configured label cycle
//! - Computing correctness, final accuracy and the cumulative accuracy series
//!
//! Nothing in this module touches the UI, so the whole pipeline can be
//! exercised from tests.

pub mod accuracy;
pub mod log_loader;
pub mod types;

pub use accuracy::analyze;
pub use log_loader::load_log;
pub use types::{AccuracyReport, AnalysisError};
