//! Registers every phase's metrics and reports name clashes.

use crate::metrics::{MetricDoc, PhaseMetrics};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub fn register_all_metrics() {
    let mut all_metrics = HashMap::new();

    register_phase_metrics::<super::batch::BatchMetrics>(&mut all_metrics);

    info!("Registered {} metrics", all_metrics.len());
    for doc in all_metrics.values() {
        debug!(name = doc.name, phase = ?phase_of(doc.name), kind = ?doc.metric_type, "{}", doc.help);
    }
}

fn register_phase_metrics<T: PhaseMetrics>(all_metrics: &mut HashMap<&'static str, MetricDoc>) {
    T::register_metrics();
    let phase_name = T::phase_name();

    for doc in T::metrics_documentation() {
        if all_metrics.contains_key(doc.name) {
            warn!(
                "Metric name conflict: '{}' registered twice (phase '{}')",
                doc.name, phase_name
            );
        } else {
            all_metrics.insert(doc.name, doc);
        }
    }
}

/// Phase segment of a metric name (`tweet_normalizer_batch_runs_total` -> `batch`).
pub fn phase_of(metric_name: &str) -> Option<&str> {
    metric_name
        .strip_prefix("tweet_normalizer_")
        .and_then(|rest| rest.split('_').next())
        .filter(|phase| !phase.is_empty())
}
