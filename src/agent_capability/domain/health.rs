//! Capability-based agent health check.

use super::{AgentCapability, CapabilityStatus};
use crate::agent_health::domain::HealthStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue count from which an agent is considered unhealthy.
const UNHEALTHY_ISSUE_COUNT: usize = 3;

/// Outcome of checking one agent's capability list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityHealthCheck {
    /// Derived status.
    pub status: HealthStatus,
    /// One message per problem found.
    pub issues: Vec<String>,
    /// When the check ran.
    pub last_checked: DateTime<Utc>,
    /// Number of capabilities checked.
    pub total_capabilities: usize,
    /// Number of active capabilities.
    pub active_capabilities: usize,
}

impl CapabilityHealthCheck {
    /// Checks `capabilities` at `now`.
    ///
    /// Deprecated and experimental capabilities are issues, as is a
    /// capability never used more than `unused_after_days` days after
    /// registration. No issues is healthy, fewer than three is degraded.
    #[must_use]
    pub fn evaluate(
        capabilities: &[AgentCapability],
        unused_after_days: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let mut issues = Vec::new();
        for capability in capabilities {
            let name = &capability.capability_name;
            match capability.status {
                CapabilityStatus::Deprecated => {
                    issues.push(format!("Capability {name} is deprecated"));
                }
                CapabilityStatus::Experimental => {
                    issues.push(format!("Capability {name} is experimental"));
                }
                CapabilityStatus::Active => {}
            }
            if capability.usage_count == 0 {
                let idle_days = (now - capability.registered_at).num_days();
                if idle_days > unused_after_days {
                    issues.push(format!("Capability {name} unused for {idle_days} days"));
                }
            }
        }

        let status = match issues.len() {
            0 => HealthStatus::Healthy,
            count if count < UNHEALTHY_ISSUE_COUNT => HealthStatus::Degraded,
            _ => HealthStatus::Unhealthy,
        };
        Self {
            status,
            issues,
            last_checked: now,
            total_capabilities: capabilities.len(),
            active_capabilities: capabilities
                .iter()
                .filter(|capability| capability.status == CapabilityStatus::Active)
                .count(),
        }
    }
}
