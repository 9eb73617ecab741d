//! Metrics sink adapters.

use crate::access::ports::{MetricLabels, MetricsSink};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Discards every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&self, _metric: &str, _value: f64, _labels: MetricLabels<'_>) {}
}

/// Emits every sample as a `debug` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetricsSink;

impl MetricsSink for TracingMetricsSink {
    fn record(&self, metric: &str, value: f64, labels: MetricLabels<'_>) {
        debug!(metric, value, ?labels, "curator metric");
    }
}

/// Sums samples per metric name in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricsSink {
    totals: Arc<Mutex<HashMap<String, f64>>>,
}

impl InMemoryMetricsSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the summed value of a metric, or zero when never recorded.
    #[must_use]
    pub fn total(&self, metric: &str) -> f64 {
        self.totals
            .lock()
            .ok()
            .and_then(|totals| totals.get(metric).copied())
            .unwrap_or_default()
    }
}

impl MetricsSink for InMemoryMetricsSink {
    #[expect(
        clippy::float_arithmetic,
        reason = "metric totals are accumulated sums of f64 samples"
    )]
    fn record(&self, metric: &str, value: f64, _labels: MetricLabels<'_>) {
        if let Ok(mut totals) = self.totals.lock() {
            *totals.entry(metric.to_owned()).or_default() += value;
        }
    }
}
