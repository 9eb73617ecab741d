//! Operation metrics port.

/// Label pairs attached to a metric sample.
pub type MetricLabels<'a> = &'a [(&'static str, &'a str)];

/// Receives counters emitted by Curator operations.
///
/// Recording never fails; sinks that forward to a remote system swallow
/// their own transport errors.
pub trait MetricsSink: Send + Sync {
    /// Records one sample for the named metric.
    fn record(&self, metric: &str, value: f64, labels: MetricLabels<'_>);
}
