//! Fleet-wide usage statistics per capability name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Usage of one capability name across all agents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityUsage {
    /// Total recorded uses.
    pub total_uses: u64,
    /// Time of the most recent use.
    pub last_used: Option<DateTime<Utc>>,
    /// Uses per agent id.
    pub usage_by_agent: BTreeMap<String, u64>,
    /// Uses per pillar.
    pub usage_by_pillar: BTreeMap<String, u64>,
    /// Uses per specialization.
    pub usage_by_specialization: BTreeMap<String, u64>,
}

fn bump(counts: &mut BTreeMap<String, u64>, key: &str) {
    let count = counts.entry(key.to_owned()).or_default();
    *count = count.saturating_add(1);
}

impl CapabilityUsage {
    /// Counts one use by `agent_id`, attributed to the given pillar and
    /// specialization when known.
    pub fn record(
        &mut self,
        agent_id: &str,
        pillar: Option<&str>,
        specialization: Option<&str>,
        used_at: DateTime<Utc>,
    ) {
        self.total_uses = self.total_uses.saturating_add(1);
        self.last_used = Some(used_at);
        bump(&mut self.usage_by_agent, agent_id);
        if let Some(name) = pillar {
            bump(&mut self.usage_by_pillar, name);
        }
        if let Some(name) = specialization {
            bump(&mut self.usage_by_specialization, name);
        }
    }
}
