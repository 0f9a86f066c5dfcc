//! Batch phase metrics: records read, kept, and dropped per run.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct BatchMetrics;

impl BatchMetrics {
    pub fn record_batch_run(
        records_read: usize,
        records_kept: usize,
        dropped_empty: usize,
        invalid: usize,
        duration_secs: f64,
    ) {
        ::metrics::counter!(phase_metric!(counter, "batch", "runs")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "batch", "records_read"))
            .increment(records_read as u64);
        ::metrics::counter!(phase_metric!(counter, "batch", "records_kept"))
            .increment(records_kept as u64);
        ::metrics::counter!(phase_metric!(counter, "batch", "records_dropped_empty"))
            .increment(dropped_empty as u64);
        ::metrics::counter!(phase_metric!(counter, "batch", "records_invalid"))
            .increment(invalid as u64);
        if duration_secs > 0.0 {
            ::metrics::histogram!(phase_metric!(histogram, "batch", "duration_seconds"))
                .record(duration_secs);
        }
    }

    /// Record a batch aborted by an invalid record
    pub fn record_batch_failure() {
        ::metrics::counter!(phase_metric!(counter, "batch", "failures")).increment(1);
    }

    pub fn record_resource_load(duration_secs: f64) {
        ::metrics::histogram!(phase_metric!(histogram, "batch", "resource_load_seconds"))
            .record(duration_secs);
    }
}

impl PhaseMetrics for BatchMetrics {
    fn register_metrics() {
        use metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "batch", "runs"));
        let _ = counter!(phase_metric!(counter, "batch", "records_read"));
        let _ = counter!(phase_metric!(counter, "batch", "records_kept"));
        let _ = counter!(phase_metric!(counter, "batch", "records_dropped_empty"));
        let _ = counter!(phase_metric!(counter, "batch", "records_invalid"));
        let _ = counter!(phase_metric!(counter, "batch", "failures"));

        let _ = histogram!(phase_metric!(histogram, "batch", "duration_seconds"));
        let _ = histogram!(phase_metric!(histogram, "batch", "resource_load_seconds"));
    }

    fn phase_name() -> &'static str {
        "batch"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "batch", "runs"),
                metric_type: MetricType::Counter,
                help: "Completed batch cleaning runs",
            },
            MetricDoc {
                name: phase_metric!(counter, "batch", "records_read"),
                metric_type: MetricType::Counter,
                help: "Rows read from the input file",
            },
            MetricDoc {
                name: phase_metric!(counter, "batch", "records_kept"),
                metric_type: MetricType::Counter,
                help: "Records whose cleaned text was non-empty",
            },
            MetricDoc {
                name: phase_metric!(counter, "batch", "records_dropped_empty"),
                metric_type: MetricType::Counter,
                help: "Records dropped because cleaning left no text",
            },
            MetricDoc {
                name: phase_metric!(counter, "batch", "records_invalid"),
                metric_type: MetricType::Counter,
                help: "Rows skipped for a missing text or unparseable label",
            },
            MetricDoc {
                name: phase_metric!(counter, "batch", "failures"),
                metric_type: MetricType::Counter,
                help: "Runs aborted by an invalid record",
            },
            MetricDoc {
                name: phase_metric!(histogram, "batch", "duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Wall time spent cleaning one batch",
            },
            MetricDoc {
                name: phase_metric!(histogram, "batch", "resource_load_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time spent loading lexical resources",
            },
        ]
    }
}
