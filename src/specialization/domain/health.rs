//! Fleet-wide specialization health report.

use super::SpecializationAnalytics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

const HEALTHY_SUCCESS_RATE: f64 = 0.8;
const DEGRADED_SUCCESS_RATE: f64 = 0.5;
const TOP_PERFORMER_LIMIT: usize = 5;

/// Number of specializations per health class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationHealthSummary {
    /// Active agents with an average success rate of at least 0.8.
    pub healthy_specializations: usize,
    /// Active agents with an average success rate of at least 0.5.
    pub degraded_specializations: usize,
    /// Everything else.
    pub unhealthy_specializations: usize,
}

/// Leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpecialization {
    /// Specialization identifier.
    pub specialization_id: String,
    /// Display name.
    pub specialization_name: String,
    /// Mean success rate.
    pub success_rate: f64,
    /// Bound agents.
    pub total_agents: usize,
    /// Total usage.
    pub total_usage: u64,
}

/// Health of every specialization with analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationHealthReport {
    /// Known specializations, bound or not.
    pub total_specializations: usize,
    /// Bound agents.
    pub total_agents: usize,
    /// Health classes.
    pub health_summary: SpecializationHealthSummary,
    /// Specializations per pillar.
    pub pillar_distribution: BTreeMap<String, usize>,
    /// Best five by success rate, then usage.
    pub top_performing_specializations: Vec<TopSpecialization>,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
}

fn by_performance(left: &TopSpecialization, right: &TopSpecialization) -> Ordering {
    right
        .success_rate
        .total_cmp(&left.success_rate)
        .then_with(|| right.total_usage.cmp(&left.total_usage))
}

impl SpecializationHealthReport {
    /// Builds the report from the latest analytics and the pillar index.
    #[must_use]
    pub fn build<'a>(
        total_specializations: usize,
        total_agents: usize,
        analytics: impl IntoIterator<Item = &'a SpecializationAnalytics>,
        pillars: &BTreeMap<String, BTreeSet<String>>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut health_summary = SpecializationHealthSummary::default();
        let mut performers = Vec::new();
        for entry in analytics {
            let serving = entry.active_agents > 0;
            if serving && entry.average_success_rate >= HEALTHY_SUCCESS_RATE {
                health_summary.healthy_specializations += 1;
            } else if serving && entry.average_success_rate >= DEGRADED_SUCCESS_RATE {
                health_summary.degraded_specializations += 1;
            } else {
                health_summary.unhealthy_specializations += 1;
            }
            if entry.total_agents > 0 {
                performers.push(TopSpecialization {
                    specialization_id: entry.specialization_id.clone(),
                    specialization_name: entry.specialization_name.clone(),
                    success_rate: entry.average_success_rate,
                    total_agents: entry.total_agents,
                    total_usage: entry.total_usage_count,
                });
            }
        }
        performers.sort_by(by_performance);
        performers.truncate(TOP_PERFORMER_LIMIT);

        Self {
            total_specializations,
            total_agents,
            health_summary,
            pillar_distribution: pillars
                .iter()
                .map(|(pillar, members)| (pillar.clone(), members.len()))
                .collect(),
            top_performing_specializations: performers,
            generated_at,
        }
    }
}
