//! Probe observations.

use super::{ComponentStatus, HealthDomainError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource consumption reported by an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceUsage {
    /// CPU usage in percent.
    pub cpu_percentage: f64,
    /// Resident memory in megabytes.
    pub memory_mb: f64,
    /// Disk usage in megabytes.
    pub disk_usage_mb: f64,
    /// Network traffic in megabytes.
    pub network_io_mb: f64,
}

/// Throughput and latency figures reported by an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    /// Requests handled per minute.
    pub requests_per_minute: f64,
    /// Mean processing time in milliseconds.
    pub average_processing_time_ms: f64,
    /// Peak memory in megabytes.
    pub peak_memory_usage_mb: f64,
    /// Cache hit rate in `[0, 1]`.
    pub cache_hit_rate: f64,
    /// Errors during the last hour.
    pub error_count_last_hour: u64,
}

/// One health sample for an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthObservation {
    /// Response time in milliseconds.
    pub response_time_ms: f64,
    /// Fraction of successful requests in `[0, 1]`.
    pub success_rate: f64,
    /// Fraction of failed requests in `[0, 1]`.
    pub error_rate: f64,
    /// Fraction of time available in `[0, 1]`.
    pub availability: f64,
    /// Status per capability.
    #[serde(default)]
    pub capabilities_status: BTreeMap<String, ComponentStatus>,
    /// Status per dependency.
    #[serde(default)]
    pub dependencies_status: BTreeMap<String, ComponentStatus>,
    /// Resource consumption.
    #[serde(default)]
    pub resource_usage: ResourceUsage,
    /// Performance figures.
    #[serde(default)]
    pub performance_metrics: PerformanceMetrics,
}

impl HealthObservation {
    /// Creates an observation from the four headline figures.
    #[must_use]
    pub fn new(
        response_time_ms: f64,
        success_rate: f64,
        error_rate: f64,
        availability: f64,
    ) -> Self {
        Self {
            response_time_ms,
            success_rate,
            error_rate,
            availability,
            capabilities_status: BTreeMap::new(),
            dependencies_status: BTreeMap::new(),
            resource_usage: ResourceUsage::default(),
            performance_metrics: PerformanceMetrics::default(),
        }
    }

    /// Records the status of a capability.
    #[must_use]
    pub fn with_capability(mut self, name: impl Into<String>, status: ComponentStatus) -> Self {
        self.capabilities_status.insert(name.into(), status);
        self
    }

    /// Records the status of a dependency.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, status: ComponentStatus) -> Self {
        self.dependencies_status.insert(name.into(), status);
        self
    }

    /// Attaches resource usage.
    #[must_use]
    pub const fn with_resource_usage(mut self, usage: ResourceUsage) -> Self {
        self.resource_usage = usage;
        self
    }

    /// Attaches performance figures.
    #[must_use]
    pub const fn with_performance_metrics(mut self, metrics: PerformanceMetrics) -> Self {
        self.performance_metrics = metrics;
        self
    }

    /// Checks that every headline figure is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`HealthDomainError::InvalidObservation`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), HealthDomainError> {
        if !self.response_time_ms.is_finite() || self.response_time_ms < 0.0 {
            return Err(HealthDomainError::InvalidObservation {
                field: "response_time_ms",
            });
        }
        let rates = [
            ("success_rate", self.success_rate),
            ("error_rate", self.error_rate),
            ("availability", self.availability),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(HealthDomainError::InvalidObservation { field });
            }
        }
        Ok(())
    }
}
