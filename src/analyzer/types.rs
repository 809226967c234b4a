//! Type definitions specific to the analyzer module.

/// Error type for loading and analysing a performance log.
#[derive(Debug)]
pub enum AnalysisError {
    /// The log file could not be opened or read.
    FileRead(String),
    /// The delimited-text reader rejected the input.
    Csv(String),
    /// A required column is not present in the header row.
    MissingColumn(String),
    /// A field could not be parsed; `line` is 1-based.
    InvalidValue { line: u64, column: String, value: String },
    /// No rows are left to analyse.
    EmptyLog,
    InvalidConfig(String),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::FileRead(msg) => write!(f, "Failed to read log file: {}", msg),
            AnalysisError::Csv(msg) => write!(f, "Failed to parse log file: {}", msg),
            AnalysisError::MissingColumn(column) => write!(f, "Log file has no '{}' column", column),
            AnalysisError::InvalidValue { line, column, value } => {
                write!(f, "Invalid '{}' value '{}' on line {}", column, value, line)
            }
            AnalysisError::EmptyLog => write!(f, "Log file contains no samples to analyse"),
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// One sample from the performance log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Class label predicted by the classifier.
    pub prediction: i64,
    /// Time the classifier spent on this sample, when logged.
    pub processing_time_ms: Option<f64>,
}

/// Hit rate for one ground-truth class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAccuracy {
    pub label: u32,
    pub name: String,
    pub samples: usize,
    pub correct: usize,
}

impl ClassAccuracy {
    /// Fraction of this class's samples that were predicted correctly.
    pub fn fraction(&self) -> f64 {
        if self.samples == 0 { 0.0 } else { self.correct as f64 / self.samples as f64 }
    }
}

/// Aggregate processing latency over rows that logged it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingStats {
    pub mean_ms: f64,
    pub max_ms: f64,
    pub samples: usize,
}

/// Result of analysing a performance log. Every per-row vector has the same
/// length and follows the log's row order.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    pub predictions: Vec<i64>,
    pub ground_truth: Vec<u32>,
    /// 1 where the prediction matches the ground truth, 0 otherwise.
    pub correct: Vec<u8>,
    /// Running mean of `correct` up to and including each row.
    pub cumulative: Vec<f64>,
    /// Mean of `correct` over all analysed rows, in `[0, 1]`.
    pub final_fraction: f64,
    /// Rows excluded by the truncating remainder policy.
    pub dropped_rows: usize,
    pub classes: Vec<ClassAccuracy>,
    pub processing: Option<ProcessingStats>,
}

impl AccuracyReport {
    pub fn row_count(&self) -> usize {
        self.correct.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct.iter().map(|&c| c as usize).sum()
    }

    /// Final accuracy as a percentage in `[0, 100]`.
    pub fn accuracy_percent(&self) -> f64 {
        self.final_fraction * 100.0
    }

    /// Legend text for the reference line, e.g. `Final Accuracy: 83.33%`.
    pub fn final_accuracy_label(&self) -> String {
        format!("Final Accuracy: {:.2}%", self.accuracy_percent())
    }
}
