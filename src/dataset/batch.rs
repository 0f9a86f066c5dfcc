use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use tracing::{info, instrument, warn};

use super::{BatchReport, CleanedDataset, RawRow, Record};
use crate::config::{InputConfig, InvalidRecordPolicy};
use crate::error::{NormalizerError, Result};
use crate::metrics::BatchMetrics;
use crate::pipeline::TextNormalizer;

/// Result of cleaning one batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub dataset: CleanedDataset,
    pub report: BatchReport,
}

/// Cleans records in parallel with a shared [`TextNormalizer`].
///
/// Records are cleaned independently, then reassembled in input order, so the
/// output does not depend on the number of threads.
pub struct BatchCleaner {
    normalizer: TextNormalizer,
    pool: Option<ThreadPool>,
}

impl BatchCleaner {
    /// `threads == 0` uses rayon's global pool (one thread per core).
    pub fn new(normalizer: TextNormalizer, threads: usize) -> Result<Self> {
        let pool = if threads == 0 {
            None
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    NormalizerError::Config(format!("Failed to build thread pool: {}", e))
                })?;
            Some(pool)
        };
        Ok(Self { normalizer, pool })
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    fn install<T, F>(&self, op: F) -> T
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Validates and cleans raw rows.
    ///
    /// Invalid rows follow `input.invalid_records`: `skip` counts and logs them,
    /// `fail` returns the first one in input order. Records that clean down to
    /// an empty string are dropped together with their label.
    #[instrument(skip(self, rows, input), fields(rows = rows.len()))]
    pub fn clean_rows(&self, rows: Vec<RawRow>, input: &InputConfig) -> Result<BatchOutcome> {
        let started = Instant::now();
        let total = rows.len();

        let results: Vec<Result<(i64, String)>> = self.install(|| {
            rows.into_par_iter()
                .map(|row| {
                    let record = row.into_record(input)?;
                    Ok((record.label, self.normalizer.normalize(&record.text)))
                })
                .collect()
        });

        let mut dataset = CleanedDataset::new();
        let mut report = BatchReport {
            total,
            ..Default::default()
        };
        for result in results {
            match result {
                Ok((label, text)) => keep_or_drop(&mut dataset, &mut report, text, label),
                Err(e) => match input.invalid_records {
                    InvalidRecordPolicy::Fail => {
                        BatchMetrics::record_batch_failure();
                        return Err(e);
                    }
                    InvalidRecordPolicy::Skip => {
                        warn!("Skipping {}", e);
                        report.invalid += 1;
                    }
                },
            }
        }

        Ok(self.finish(dataset, report, started))
    }

    /// Cleans already validated records. Never fails.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn clean_records(&self, records: &[Record]) -> BatchOutcome {
        let started = Instant::now();

        let cleaned: Vec<(i64, String)> = self.install(|| {
            records
                .par_iter()
                .map(|record| (record.label, self.normalizer.normalize(&record.text)))
                .collect()
        });

        let mut dataset = CleanedDataset::new();
        let mut report = BatchReport {
            total: records.len(),
            ..Default::default()
        };
        for (label, text) in cleaned {
            keep_or_drop(&mut dataset, &mut report, text, label);
        }

        self.finish(dataset, report, started)
    }

    fn finish(
        &self,
        dataset: CleanedDataset,
        mut report: BatchReport,
        started: Instant,
    ) -> BatchOutcome {
        let elapsed = started.elapsed();
        report.kept = dataset.len();
        report.duration_ms = elapsed.as_millis() as u64;

        BatchMetrics::record_batch_run(
            report.total,
            report.kept,
            report.dropped_empty,
            report.invalid,
            elapsed.as_secs_f64(),
        );
        info!(
            total = report.total,
            kept = report.kept,
            dropped_empty = report.dropped_empty,
            invalid = report.invalid,
            duration_ms = report.duration_ms,
            "Batch cleaned"
        );

        BatchOutcome { dataset, report }
    }
}

fn keep_or_drop(dataset: &mut CleanedDataset, report: &mut BatchReport, text: String, label: i64) {
    if text.is_empty() {
        report.dropped_empty += 1;
    } else {
        dataset.push(text, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleaningConfig;
    use crate::resources::Resources;
    use std::sync::Arc;

    fn cleaner(threads: usize) -> BatchCleaner {
        let normalizer = TextNormalizer::new(
            CleaningConfig {
                handle_negation: true,
                ..Default::default()
            },
            Arc::new(Resources::english().unwrap()),
        );
        BatchCleaner::new(normalizer, threads).unwrap()
    }

    fn row(row: usize, label: &str, text: &str) -> RawRow {
        RawRow {
            row,
            label: Some(label.to_string()),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_empty_results_drop_with_their_labels() {
        let rows = vec![
            row(1, "0", "I hate rainy mondays"),
            row(2, "4", "@someone #tag"),
            row(3, "4", "Loving this sunshine!!!"),
        ];
        let outcome = cleaner(2).clean_rows(rows, &InputConfig::default()).unwrap();

        assert_eq!(outcome.dataset.texts(), &["hate rainy mondays", "loving sunshine"]);
        assert_eq!(outcome.dataset.labels(), &[0, 1]);
        assert_eq!(outcome.report.total, 3);
        assert_eq!(outcome.report.kept, 2);
        assert_eq!(outcome.report.dropped_empty, 1);
    }

    #[test]
    fn test_skip_policy_counts_invalid_rows() {
        let rows = vec![
            row(1, "0", "bad day"),
            RawRow {
                row: 2,
                label: Some("1".to_string()),
                text: None,
            },
            row(3, "x", "good day"),
            row(4, "4", "good day"),
        ];
        let outcome = cleaner(0).clean_rows(rows, &InputConfig::default()).unwrap();
        assert_eq!(outcome.report.invalid, 2);
        assert_eq!(outcome.dataset.labels(), &[0, 1]);
    }

    #[test]
    fn test_fail_policy_reports_first_invalid_row() {
        let input = InputConfig {
            invalid_records: InvalidRecordPolicy::Fail,
            ..Default::default()
        };
        let rows = vec![row(1, "0", "fine"), row(2, "?", "x"), row(3, "?", "y")];
        let err = cleaner(4).clean_rows(rows, &input).unwrap_err();
        assert!(matches!(err, NormalizerError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn test_thread_count_does_not_change_output() {
        let records: Vec<Record> = (0..200)
            .map(|i| Record {
                label: i % 2,
                text: format!("Tweet number {} is sooooo not boring!!! www.x{}.com", i, i),
            })
            .collect();

        let single = cleaner(1).clean_records(&records);
        let many = cleaner(8).clean_records(&records);
        assert_eq!(single.dataset, many.dataset);
        assert_eq!(single.dataset.len(), 200);
        assert_eq!(single.dataset.texts()[3], "tweet number not boring");
    }
}
