//! Metrics for batch cleaning runs.
//!
//! Each phase of a run owns a metrics struct with its own counters. The
//! recorder is installed in-process only; a run renders the snapshot into
//! its output directory instead of serving it over HTTP.

pub mod batch;
pub mod registry;

pub use batch::BatchMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register every phase's metrics.
///
/// Idempotent. When another recorder is already installed the call only logs;
/// metric calls keep working but [`render`] returns `None`.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Metrics handle was already set");
            }
            registry::register_all_metrics();
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
}

/// Current snapshot in Prometheus text format.
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

/// Implemented by each phase's metrics struct.
pub trait PhaseMetrics {
    /// Touch every metric of the phase so it shows up in the first snapshot.
    fn register_metrics();

    fn phase_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Builds metric names as `tweet_normalizer_{phase}_{name}[_total]`.
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("tweet_normalizer_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("tweet_normalizer_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_metric_naming() {
        assert_eq!(
            phase_metric!(counter, "batch", "records_read"),
            "tweet_normalizer_batch_records_read_total"
        );
        assert_eq!(
            phase_metric!(histogram, "batch", "duration_seconds"),
            "tweet_normalizer_batch_duration_seconds"
        );
    }
}
