//! Threshold-based health classification.

use super::{HealthObservation, HealthStatus};
use serde::{Deserialize, Serialize};

/// Limits an agent must respect to be considered healthy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Maximum acceptable response time in milliseconds.
    pub response_time_ms: f64,
    /// Minimum acceptable success rate.
    pub success_rate: f64,
    /// Maximum acceptable error rate.
    pub error_rate: f64,
    /// Minimum acceptable availability.
    pub availability: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            response_time_ms: 5_000.0,
            success_rate: 0.95,
            error_rate: 0.05,
            availability: 0.99,
        }
    }
}

impl HealthThresholds {
    /// Whether the response time exceeds its limit.
    #[must_use]
    pub fn response_time_exceeded(&self, response_time_ms: f64) -> bool {
        response_time_ms > self.response_time_ms
    }

    /// Whether the success rate is below its limit.
    #[must_use]
    pub fn success_rate_low(&self, success_rate: f64) -> bool {
        success_rate < self.success_rate
    }

    /// Whether the error rate exceeds its limit.
    #[must_use]
    pub fn error_rate_exceeded(&self, error_rate: f64) -> bool {
        error_rate > self.error_rate
    }

    /// Whether availability is below its limit.
    #[must_use]
    pub fn availability_low(&self, availability: f64) -> bool {
        availability < self.availability
    }

    /// Classifies an observation.
    ///
    /// Success and error rate violations are hard (`Unhealthy`); response time
    /// and availability violations are soft (`Degraded`). A hard violation
    /// wins over any number of soft ones. Values exactly at a limit pass.
    #[must_use]
    pub fn classify(&self, observation: &HealthObservation) -> HealthStatus {
        if self.success_rate_low(observation.success_rate)
            || self.error_rate_exceeded(observation.error_rate)
        {
            return HealthStatus::Unhealthy;
        }
        if self.response_time_exceeded(observation.response_time_ms)
            || self.availability_low(observation.availability)
        {
            return HealthStatus::Degraded;
        }
        HealthStatus::Healthy
    }
}
