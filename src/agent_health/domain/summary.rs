//! Fleet-wide health summary.

use super::{AgentHealthMetrics, AlertLog, HealthStatus};
use crate::numeric::mean;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of agents per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDistribution {
    /// Agents classified healthy.
    pub healthy: usize,
    /// Agents classified degraded.
    pub degraded: usize,
    /// Agents classified unhealthy.
    pub unhealthy: usize,
    /// Agents not yet checked.
    pub unknown: usize,
}

/// Fleet averages of the headline figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Mean response time in milliseconds.
    pub response_time_ms: f64,
    /// Mean success rate.
    pub success_rate: f64,
    /// Mean error rate.
    pub error_rate: f64,
    /// Mean availability.
    pub availability: f64,
}

/// Stored alerts across the fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTotals {
    /// All stored alerts.
    pub total: usize,
    /// Critical alerts.
    pub critical: usize,
    /// Warning alerts.
    pub warning: usize,
}

/// Fleet-wide health overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Number of monitored agents.
    pub total_agents: usize,
    /// Agents per status.
    pub health_distribution: HealthDistribution,
    /// Fleet averages.
    pub average_metrics: AverageMetrics,
    /// Alert counts.
    pub alerts: AlertTotals,
    /// When the summary was produced.
    pub generated_at: DateTime<Utc>,
}

impl HealthSummary {
    /// Summarises each agent's metrics together with its alert log.
    #[must_use]
    pub fn build<'a>(
        records: impl IntoIterator<Item = (&'a AgentHealthMetrics, &'a AlertLog)>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let (agents, alert_logs): (Vec<&AgentHealthMetrics>, Vec<&AlertLog>) =
            records.into_iter().unzip();
        let mut distribution = HealthDistribution::default();
        for agent in &agents {
            match agent.overall_status {
                HealthStatus::Healthy => distribution.healthy += 1,
                HealthStatus::Degraded => distribution.degraded += 1,
                HealthStatus::Unhealthy => distribution.unhealthy += 1,
                HealthStatus::Unknown => distribution.unknown += 1,
            }
        }

        let average_metrics = AverageMetrics {
            response_time_ms: mean(agents.iter().map(|agent| agent.response_time_ms)),
            success_rate: mean(agents.iter().map(|agent| agent.success_rate)),
            error_rate: mean(agents.iter().map(|agent| agent.error_rate)),
            availability: mean(agents.iter().map(|agent| agent.availability)),
        };

        let (total, critical) = alert_logs
            .iter()
            .fold((0, 0), |(total, critical), log| {
                (total + log.len(), critical + log.critical_count())
            });

        Self {
            total_agents: agents.len(),
            health_distribution: distribution,
            average_metrics,
            alerts: AlertTotals {
                total,
                critical,
                warning: total.saturating_sub(critical),
            },
            generated_at,
        }
    }
}
