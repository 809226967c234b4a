//! Reads the classifier's performance log into ordered records.
//!
//! The logger writes `Time,Prediction,ProcessingTime(ms)` rows and appends to
//! the same file across runs, writing a fresh header line on every start.
//! Only `Prediction` is required; `ProcessingTime(ms)` is picked up when present.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::types::{AnalysisError, LogRecord};

/// Buffer size for reading log files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

pub const PREDICTION_COLUMN: &str = "Prediction";
pub const PROCESSING_TIME_COLUMN: &str = "ProcessingTime(ms)";

/// Load every sample from the log file at `path`, preserving row order.
///
/// The file is closed before this function returns.
///
/// # Returns
///
/// `Ok(records)` on success (possibly empty), `Err` if the file cannot be read,
/// lacks a `Prediction` column, or contains a non-integer prediction.
pub fn load_log(path: &Path) -> Result<Vec<LogRecord>, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::FileRead(format!("{}: {}", path.display(), e)))?;
    let records = load_from_reader(BufReader::with_capacity(BUFFER_SIZE, file))?;
    log::info!("Loaded {} samples from {}", records.len(), path.display());
    Ok(records)
}

/// Parse log records from any reader containing delimited text with a header row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<LogRecord>, AnalysisError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let prediction_index = headers
        .iter()
        .position(|h| h == PREDICTION_COLUMN)
        .ok_or_else(|| AnalysisError::MissingColumn(PREDICTION_COLUMN.to_string()))?;
    let processing_index = headers.iter().position(|h| h == PROCESSING_TIME_COLUMN);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        // Rows consisting of a single empty field are blank lines
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let prediction_field = row.get(prediction_index).unwrap_or("");

        // Header repeated by a restarted logger
        if prediction_field == PREDICTION_COLUMN {
            log::debug!("Skipping repeated header on line {}", line);
            continue;
        }

        let prediction = prediction_field.parse::<i64>().map_err(|_| AnalysisError::InvalidValue {
            line,
            column: PREDICTION_COLUMN.to_string(),
            value: prediction_field.to_string(),
        })?;

        let processing_time_ms = processing_index
            .and_then(|index| row.get(index))
            .and_then(|field| field.parse::<f64>().ok())
            .filter(|value| value.is_finite());

        records.push(LogRecord {
            prediction,
            processing_time_ms,
        });
    }

    Ok(records)
}

fn csv_error(e: csv::Error) -> AnalysisError {
    AnalysisError::Csv(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions(records: &[LogRecord]) -> Vec<i64> {
        records.iter().map(|r| r.prediction).collect()
    }

    #[test]
    fn test_load_logger_output() {
        let data = "Time,Prediction,ProcessingTime(ms)\n0.52,0,0.52\n0.61,1,0.61\n0.48,3,0.48\n";
        let records = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(predictions(&records), vec![0, 1, 3]);
        assert_eq!(records[1].processing_time_ms, Some(0.61));
    }

    #[test]
    fn test_prediction_only_column() {
        let data = "Prediction\n5\n4\n";
        let records = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(predictions(&records), vec![5, 4]);
        assert!(records.iter().all(|r| r.processing_time_ms.is_none()));
    }

    #[test]
    fn test_missing_prediction_column() {
        let data = "Time,Label\n1,2\n";
        let result = load_from_reader(data.as_bytes());
        assert!(matches!(result, Err(AnalysisError::MissingColumn(ref c)) if c == "Prediction"));
    }

    #[test]
    fn test_repeated_header_is_skipped() {
        let data = "Time,Prediction,ProcessingTime(ms)\n1,2,1\nTime,Prediction,ProcessingTime(ms)\n1,3,1\n";
        let records = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(predictions(&records), vec![2, 3]);
    }

    #[test]
    fn test_invalid_prediction_reports_line() {
        let data = "Prediction\n1\nabc\n";
        match load_from_reader(data.as_bytes()) {
            Err(AnalysisError::InvalidValue { line, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = load_from_reader("Time,Prediction\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let data = "Prediction , Extra\n 2 , x\n\n 4 ,y\n";
        let records = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(predictions(&records), vec![2, 4]);
    }

    #[test]
    fn test_missing_file() {
        let result = load_log(Path::new("no/such/dir/performance_log.csv"));
        assert!(matches!(result, Err(AnalysisError::FileRead(_))));
    }
}
