//! Per-agent capability reports and fleet analytics.

use super::{AgentCapability, CapabilityHealthCheck, CapabilityStatus};
use crate::agent_health::domain::HealthStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capability breakdown for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCapabilityReport {
    /// Agent identifier.
    pub agent_id: String,
    /// Agent display name.
    pub agent_name: String,
    /// Number of capabilities.
    pub total_capabilities: usize,
    /// Number of active capabilities.
    pub active_capabilities: usize,
    /// Number of deprecated capabilities.
    pub deprecated_capabilities: usize,
    /// Number of experimental capabilities.
    pub experimental_capabilities: usize,
    /// Counts per capability type.
    pub capabilities_by_type: BTreeMap<String, usize>,
    /// Counts per pillar; capabilities without one count as `unknown`.
    pub capabilities_by_pillar: BTreeMap<String, usize>,
    /// Counts per specialization; capabilities without one count as `general`.
    pub capabilities_by_specialization: BTreeMap<String, usize>,
    /// When the report was produced.
    pub last_updated: DateTime<Utc>,
    /// Result of the latest capability check, `unknown` before the first.
    pub health_status: HealthStatus,
}

#[derive(Default)]
struct Distributions {
    by_type: BTreeMap<String, usize>,
    by_pillar: BTreeMap<String, usize>,
    by_specialization: BTreeMap<String, usize>,
}

impl Distributions {
    fn add(&mut self, capability: &AgentCapability) {
        *self
            .by_type
            .entry(capability.capability_type.clone())
            .or_default() += 1;
        *self
            .by_pillar
            .entry(capability.pillar_or_unknown().to_owned())
            .or_default() += 1;
        *self
            .by_specialization
            .entry(capability.specialization_or_general().to_owned())
            .or_default() += 1;
    }
}

fn count_with(capabilities: &[AgentCapability], status: CapabilityStatus) -> usize {
    capabilities
        .iter()
        .filter(|capability| capability.status == status)
        .count()
}

impl AgentCapabilityReport {
    /// Builds the report for one agent.
    #[must_use]
    pub fn build(
        agent_id: &str,
        agent_name: &str,
        capabilities: &[AgentCapability],
        health: Option<&CapabilityHealthCheck>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut distributions = Distributions::default();
        capabilities
            .iter()
            .for_each(|capability| distributions.add(capability));
        Self {
            agent_id: agent_id.to_owned(),
            agent_name: agent_name.to_owned(),
            total_capabilities: capabilities.len(),
            active_capabilities: count_with(capabilities, CapabilityStatus::Active),
            deprecated_capabilities: count_with(capabilities, CapabilityStatus::Deprecated),
            experimental_capabilities: count_with(capabilities, CapabilityStatus::Experimental),
            capabilities_by_type: distributions.by_type,
            capabilities_by_pillar: distributions.by_pillar,
            capabilities_by_specialization: distributions.by_specialization,
            last_updated: now,
            health_status: health.map_or(HealthStatus::Unknown, |check| check.status),
        }
    }
}

/// Number of agents per capability-check outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityHealthSummary {
    /// Agents whose latest check was healthy.
    pub healthy_agents: usize,
    /// Agents whose latest check was degraded.
    pub degraded_agents: usize,
    /// Agents whose latest check was unhealthy.
    pub unhealthy_agents: usize,
}

/// Fleet-wide capability analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityAnalytics {
    /// Number of agents with registered capabilities.
    pub total_agents: usize,
    /// Number of capabilities across all agents.
    pub total_capabilities: usize,
    /// Counts per capability type.
    pub type_distribution: BTreeMap<String, usize>,
    /// Counts per pillar.
    pub pillar_distribution: BTreeMap<String, usize>,
    /// Counts per specialization.
    pub specialization_distribution: BTreeMap<String, usize>,
    /// Capability-check outcomes.
    pub health_summary: CapabilityHealthSummary,
    /// When the analytics were produced.
    pub generated_at: DateTime<Utc>,
}

impl CapabilityAnalytics {
    /// Aggregates every agent's capabilities and latest check.
    #[must_use]
    pub fn build<'a>(
        agents: impl IntoIterator<Item = &'a [AgentCapability]>,
        checks: impl IntoIterator<Item = &'a CapabilityHealthCheck>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut distributions = Distributions::default();
        let mut total_agents = 0;
        let mut total_capabilities = 0;
        for capabilities in agents {
            total_agents += 1;
            total_capabilities += capabilities.len();
            capabilities
                .iter()
                .for_each(|capability| distributions.add(capability));
        }

        let mut health_summary = CapabilityHealthSummary::default();
        for check in checks {
            match check.status {
                HealthStatus::Healthy => health_summary.healthy_agents += 1,
                HealthStatus::Degraded => health_summary.degraded_agents += 1,
                HealthStatus::Unhealthy => health_summary.unhealthy_agents += 1,
                HealthStatus::Unknown => {}
            }
        }

        Self {
            total_agents,
            total_capabilities,
            type_distribution: distributions.by_type,
            pillar_distribution: distributions.by_pillar,
            specialization_distribution: distributions.by_specialization,
            health_summary,
            generated_at,
        }
    }
}
