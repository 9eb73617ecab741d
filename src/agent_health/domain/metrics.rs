//! Current health record of an agent.

use super::{
    ComponentStatus, HealthAlert, HealthObservation, HealthStatus, PerformanceMetrics,
    ResourceUsage,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest health figures of a monitored agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentHealthMetrics {
    /// Agent identifier.
    pub agent_id: String,
    /// Agent display name.
    pub agent_name: String,
    /// Classified status.
    pub overall_status: HealthStatus,
    /// Response time in milliseconds.
    pub response_time_ms: f64,
    /// Success rate.
    pub success_rate: f64,
    /// Error rate.
    pub error_rate: f64,
    /// Availability.
    pub availability: f64,
    /// Completion time of the latest successful check.
    pub last_health_check: Option<DateTime<Utc>>,
    /// Status per capability.
    pub capabilities_status: BTreeMap<String, ComponentStatus>,
    /// Status per dependency.
    pub dependencies_status: BTreeMap<String, ComponentStatus>,
    /// Resource consumption.
    pub resource_usage: ResourceUsage,
    /// Performance figures.
    pub performance_metrics: PerformanceMetrics,
    /// Most recent alerts, oldest first.
    pub alerts: Vec<HealthAlert>,
}

impl AgentHealthMetrics {
    /// Creates the record of a newly monitored agent, status `unknown`.
    #[must_use]
    pub fn unknown(agent_id: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: agent_name.into(),
            overall_status: HealthStatus::Unknown,
            response_time_ms: 0.0,
            success_rate: 0.0,
            error_rate: 0.0,
            availability: 0.0,
            last_health_check: None,
            capabilities_status: BTreeMap::new(),
            dependencies_status: BTreeMap::new(),
            resource_usage: ResourceUsage::default(),
            performance_metrics: PerformanceMetrics::default(),
            alerts: Vec::new(),
        }
    }

    /// Replaces the figures with those of `observation`.
    pub fn apply(
        &mut self,
        observation: HealthObservation,
        status: HealthStatus,
        checked_at: DateTime<Utc>,
    ) {
        let HealthObservation {
            response_time_ms,
            success_rate,
            error_rate,
            availability,
            capabilities_status,
            dependencies_status,
            resource_usage,
            performance_metrics,
        } = observation;
        self.overall_status = status;
        self.response_time_ms = response_time_ms;
        self.success_rate = success_rate;
        self.error_rate = error_rate;
        self.availability = availability;
        self.last_health_check = Some(checked_at);
        self.capabilities_status = capabilities_status;
        self.dependencies_status = dependencies_status;
        self.resource_usage = resource_usage;
        self.performance_metrics = performance_metrics;
    }

    /// Names of capabilities reported with `status`, in name order.
    #[must_use]
    pub fn capabilities_with(&self, status: ComponentStatus) -> Vec<&str> {
        names_with(&self.capabilities_status, status)
    }

    /// Names of dependencies reported with `status`, in name order.
    #[must_use]
    pub fn dependencies_with(&self, status: ComponentStatus) -> Vec<&str> {
        names_with(&self.dependencies_status, status)
    }
}

fn names_with(statuses: &BTreeMap<String, ComponentStatus>, wanted: ComponentStatus) -> Vec<&str> {
    statuses
        .iter()
        .filter(|(_, status)| **status == wanted)
        .map(|(name, _)| name.as_str())
        .collect()
}
