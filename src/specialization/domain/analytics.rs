//! Per-specialization analytics rollup.

use super::{AgentSpecialization, CatalogSpecialization, SpecializationStatus};
use crate::numeric::mean;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rollup of every agent bound to one specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationAnalytics {
    /// Specialization identifier.
    pub specialization_id: String,
    /// Display name.
    pub specialization_name: String,
    /// Owning pillar.
    pub pillar: String,
    /// Bound agents.
    pub total_agents: usize,
    /// Bound agents with an active binding.
    pub active_agents: usize,
    /// Bound agents with a deprecated binding.
    pub deprecated_agents: usize,
    /// Bound agents with an experimental binding.
    pub experimental_agents: usize,
    /// Mean success rate over bound agents.
    pub average_success_rate: f64,
    /// Sum of the agents' usage counts.
    pub total_usage_count: u64,
    /// Number of capabilities the specialization expects.
    pub capabilities_count: usize,
    /// When the rollup ran.
    pub last_updated: DateTime<Utc>,
}

impl SpecializationAnalytics {
    /// Derives analytics from the current bindings.
    ///
    /// Name, pillar, and capability count come from `catalog` when given,
    /// otherwise from the first binding. Returns `None` without bindings.
    #[must_use]
    pub fn derive(
        specialization_id: &str,
        agents: &[&AgentSpecialization],
        catalog: Option<&CatalogSpecialization>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let first = agents.first()?;
        let count_with = |status: SpecializationStatus| {
            agents.iter().filter(|agent| agent.status == status).count()
        };
        let (specialization_name, pillar, capabilities_count) = catalog.map_or_else(
            || {
                (
                    first.specialization_name.clone(),
                    first.pillar.clone(),
                    first.capabilities.len(),
                )
            },
            |entry| (entry.name.clone(), entry.pillar.clone(), entry.capabilities.len()),
        );

        Some(Self {
            specialization_id: specialization_id.to_owned(),
            specialization_name,
            pillar,
            total_agents: agents.len(),
            active_agents: count_with(SpecializationStatus::Active),
            deprecated_agents: count_with(SpecializationStatus::Deprecated),
            experimental_agents: count_with(SpecializationStatus::Experimental),
            average_success_rate: mean(agents.iter().map(|agent| agent.success_rate)),
            total_usage_count: agents
                .iter()
                .fold(0_u64, |total, agent| total.saturating_add(agent.usage_count)),
            capabilities_count,
            last_updated: now,
        })
    }
}
