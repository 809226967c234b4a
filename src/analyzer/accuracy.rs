//! Accuracy computation over a loaded performance log.
//!
//! Everything here is a pure function of the records and the config, so the
//! results can be checked without opening a window.

use super::types::{AccuracyReport, AnalysisError, ClassAccuracy, LogRecord, ProcessingStats};
use crate::config::{RemainderPolicy, ViewerConfig};

/// Number of leading rows that receive a ground-truth label.
///
/// With `Truncate`, rows after the last full cycle are excluded.
pub fn labelled_row_count(row_count: usize, cycle_len: usize, policy: RemainderPolicy) -> usize {
    match policy {
        RemainderPolicy::PartialCycle => row_count,
        RemainderPolicy::Truncate if cycle_len == 0 => 0,
        RemainderPolicy::Truncate => (row_count / cycle_len) * cycle_len,
    }
}

/// Repeat `cycle` over `row_count` rows, ending with a partial cycle if needed.
pub fn ground_truth_labels(cycle: &[u32], row_count: usize) -> Vec<u32> {
    cycle.iter().copied().cycle().take(row_count).collect()
}

/// Running mean of `correct` up to and including each index.
pub fn cumulative_accuracy(correct: &[u8]) -> Vec<f64> {
    let mut hits: u64 = 0;
    correct
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            hits += c as u64;
            hits as f64 / (i + 1) as f64
        })
        .collect()
}

/// Analyse the records against the configured ground-truth cycle.
///
/// # Returns
///
/// `Err(AnalysisError::EmptyLog)` when no rows remain after applying the
/// remainder policy, since accuracy is undefined for an empty table.
pub fn analyze(records: &[LogRecord], config: &ViewerConfig) -> Result<AccuracyReport, AnalysisError> {
    let cycle = &config.ground_truth_cycle;
    if cycle.is_empty() {
        return Err(AnalysisError::InvalidConfig("ground-truth-cycle must contain at least one label".to_string()));
    }

    let row_count = labelled_row_count(records.len(), cycle.len(), config.remainder_policy);
    let dropped_rows = records.len() - row_count;
    if dropped_rows > 0 {
        log::warn!(
            "Dropping {} trailing rows that do not fill a complete cycle of {} labels",
            dropped_rows,
            cycle.len()
        );
    }
    if row_count == 0 {
        return Err(AnalysisError::EmptyLog);
    }

    let records = &records[..row_count];
    let predictions: Vec<i64> = records.iter().map(|r| r.prediction).collect();
    let ground_truth = ground_truth_labels(cycle, row_count);
    let correct: Vec<u8> = predictions
        .iter()
        .zip(&ground_truth)
        .map(|(&p, &g)| u8::from(p == g as i64))
        .collect();

    let cumulative = cumulative_accuracy(&correct);
    // Same expression as the last cumulative value so the two agree exactly
    let hits: u64 = correct.iter().map(|&c| c as u64).sum();
    let final_fraction = hits as f64 / row_count as f64;

    let classes = class_breakdown(&ground_truth, &correct, config);
    let processing = processing_stats(records);

    log::debug!("Analysed {} rows, {} correct", row_count, hits);

    Ok(AccuracyReport {
        predictions,
        ground_truth,
        correct,
        cumulative,
        final_fraction,
        dropped_rows,
        classes,
        processing,
    })
}

/// Per-class sample and hit counts, one entry per distinct label in cycle order.
fn class_breakdown(ground_truth: &[u32], correct: &[u8], config: &ViewerConfig) -> Vec<ClassAccuracy> {
    let mut classes: Vec<ClassAccuracy> = Vec::new();
    for &label in &config.ground_truth_cycle {
        if classes.iter().any(|c| c.label == label) {
            continue;
        }
        classes.push(ClassAccuracy {
            label,
            name: config.class_name(label),
            samples: 0,
            correct: 0,
        });
    }

    for (&label, &c) in ground_truth.iter().zip(correct) {
        if let Some(class) = classes.iter_mut().find(|class| class.label == label) {
            class.samples += 1;
            class.correct += c as usize;
        }
    }
    classes
}

fn processing_stats(records: &[LogRecord]) -> Option<ProcessingStats> {
    let times: Vec<f64> = records.iter().filter_map(|r| r.processing_time_ms).collect();
    if times.is_empty() {
        return None;
    }
    let mean_ms = times.iter().sum::<f64>() / times.len() as f64;
    let max_ms = times.iter().copied().fold(f64::MIN, f64::max);
    Some(ProcessingStats {
        mean_ms,
        max_ms,
        samples: times.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(predictions: &[i64]) -> Vec<LogRecord> {
        predictions
            .iter()
            .map(|&prediction| LogRecord {
                prediction,
                processing_time_ms: None,
            })
            .collect()
    }

    fn truncating() -> ViewerConfig {
        ViewerConfig {
            remainder_policy: RemainderPolicy::Truncate,
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn all_predictions_correct() {
        let report = analyze(&records(&[0, 1, 2, 3, 4, 5]), &ViewerConfig::default()).unwrap();
        assert_eq!(report.ground_truth, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(report.correct, vec![1, 1, 1, 1, 1, 1]);
        assert_eq!(report.cumulative, vec![1.0; 6]);
        assert!((report.accuracy_percent() - 100.0).abs() < 1e-9);
        assert_eq!(report.final_accuracy_label(), "Final Accuracy: 100.00%");
    }

    #[test]
    fn mixed_predictions() {
        let report = analyze(&records(&[1, 1, 2, 3, 4, 0]), &ViewerConfig::default()).unwrap();
        assert_eq!(report.correct, vec![0, 1, 1, 1, 1, 0]);
        let expected = [0.0, 0.5, 2.0 / 3.0, 0.75, 0.8, 4.0 / 6.0];
        for (got, want) in report.cumulative.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
        assert_eq!(report.final_accuracy_label(), "Final Accuracy: 66.67%");
    }

    #[test]
    fn five_of_six_label() {
        let report = analyze(&records(&[0, 1, 2, 3, 4, 4]), &ViewerConfig::default()).unwrap();
        assert_eq!(report.final_accuracy_label(), "Final Accuracy: 83.33%");
    }

    #[test]
    fn cycle_repeats_over_twelve_rows() {
        assert_eq!(ground_truth_labels(&[0, 1, 2, 3, 4, 5], 12), vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn partial_cycle_labels_every_row() {
        let report = analyze(&records(&[0; 8]), &ViewerConfig::default()).unwrap();
        assert_eq!(report.ground_truth, vec![0, 1, 2, 3, 4, 5, 0, 1]);
        assert_eq!(report.row_count(), 8);
        assert_eq!(report.dropped_rows, 0);
    }

    #[test]
    fn truncate_drops_remainder() {
        let report = analyze(&records(&[0; 8]), &truncating()).unwrap();
        assert_eq!(report.row_count(), 6);
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.predictions.len(), 6);
    }

    #[test]
    fn truncate_below_one_cycle_is_empty() {
        let result = analyze(&records(&[0, 1, 2, 3]), &truncating());
        assert!(matches!(result, Err(AnalysisError::EmptyLog)));
    }

    #[test]
    fn empty_log_is_rejected() {
        let result = analyze(&[], &ViewerConfig::default());
        assert!(matches!(result, Err(AnalysisError::EmptyLog)));
    }

    #[test]
    fn report_invariants_hold() {
        let predictions: Vec<i64> = (0..97).map(|i| (i * 7 % 11) as i64 - 2).collect();
        let report = analyze(&records(&predictions), &ViewerConfig::default()).unwrap();
        let n = report.row_count();
        assert_eq!(n, 97);
        assert_eq!(report.predictions.len(), n);
        assert_eq!(report.ground_truth.len(), n);
        assert_eq!(report.cumulative.len(), n);
        assert!(report.correct.iter().all(|&c| c == 0 || c == 1));
        let expected = 100.0 * report.correct_count() as f64 / n as f64;
        assert!((report.accuracy_percent() - expected).abs() < 1e-9);
        assert_eq!(*report.cumulative.last().unwrap(), report.final_fraction);
        assert!(report.cumulative.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn analysis_is_repeatable() {
        let input = records(&[3, 1, 2, 2, 4, 5, 0, 0, 2]);
        let first = analyze(&input, &ViewerConfig::default()).unwrap();
        let second = analyze(&input, &ViewerConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn class_counts_cover_all_rows() {
        let report = analyze(&records(&[0, 0, 2, 0, 4, 0, 0, 1]), &ViewerConfig::default()).unwrap();
        let total: usize = report.classes.iter().map(|c| c.samples).sum();
        assert_eq!(total, report.row_count());

        let relax = &report.classes[0];
        assert_eq!(relax.name, "Relax");
        assert_eq!((relax.samples, relax.correct), (2, 2));
        let grip = &report.classes[1];
        assert_eq!((grip.samples, grip.correct), (2, 1));
        assert!((grip.fraction() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn processing_stats_ignore_missing_times() {
        let mut input = records(&[0, 1, 2]);
        input[0].processing_time_ms = Some(2.0);
        input[2].processing_time_ms = Some(4.0);
        let report = analyze(&input, &ViewerConfig::default()).unwrap();
        let stats = report.processing.unwrap();
        assert_eq!(stats.samples, 2);
        assert!((stats.mean_ms - 3.0).abs() < 1e-12);
        assert_eq!(stats.max_ms, 4.0);

        assert!(analyze(&records(&[0]), &ViewerConfig::default()).unwrap().processing.is_none());
    }
}
