//! Derived health report of an agent.

use super::{AgentHealthMetrics, ComponentStatus, HealthStatus, HealthThresholds, HealthTrends};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scores, trends, and advice derived from an agent's health state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentHealthReport {
    /// Agent identifier.
    pub agent_id: String,
    /// Agent display name.
    pub agent_name: String,
    /// Classified status.
    pub health_status: HealthStatus,
    /// Performance score in `[0, 100]`.
    pub performance_score: f64,
    /// Reliability score in `[0, 100]`.
    pub reliability_score: f64,
    /// Availability score in `[0, 100]`.
    pub availability_score: f64,
    /// Time of the latest successful check.
    pub last_updated: Option<DateTime<Utc>>,
    /// Trend verdict.
    pub trends: HealthTrends,
    /// Suggested remediations.
    pub recommendations: Vec<String>,
    /// Issues needing immediate attention.
    pub critical_issues: Vec<String>,
}

const CRITICAL_SUCCESS_RATE: f64 = 0.8;
const CRITICAL_ERROR_RATE: f64 = 0.2;
const CRITICAL_AVAILABILITY: f64 = 0.9;

#[expect(
    clippy::float_arithmetic,
    reason = "scores are weighted sums of rates"
)]
fn error_bonus(error_rate: f64) -> f64 {
    (30.0 - error_rate * 600.0).max(0.0)
}

impl AgentHealthReport {
    /// Builds the report for `metrics`.
    #[must_use]
    pub fn build(
        metrics: &AgentHealthMetrics,
        thresholds: &HealthThresholds,
        trends: HealthTrends,
    ) -> Self {
        Self {
            agent_id: metrics.agent_id.clone(),
            agent_name: metrics.agent_name.clone(),
            health_status: metrics.overall_status,
            performance_score: Self::performance_score(metrics),
            reliability_score: Self::reliability_score(metrics),
            availability_score: Self::availability_score(metrics),
            last_updated: metrics.last_health_check,
            trends,
            recommendations: Self::recommendations(metrics, thresholds),
            critical_issues: Self::critical_issues(metrics, thresholds),
        }
    }

    /// Response time (up to 40), success rate (up to 30), and error rate (up
    /// to 30) points.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "scores are weighted sums of rates"
    )]
    pub fn performance_score(metrics: &AgentHealthMetrics) -> f64 {
        let response_points = (40.0 - metrics.response_time_ms / 100.0).max(0.0);
        let success_points = metrics.success_rate * 30.0;
        (response_points + success_points + error_bonus(metrics.error_rate)).clamp(0.0, 100.0)
    }

    /// Success rate (up to 70) plus error rate (up to 30) points.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "scores are weighted sums of rates"
    )]
    pub fn reliability_score(metrics: &AgentHealthMetrics) -> f64 {
        (metrics.success_rate * 70.0 + error_bonus(metrics.error_rate)).clamp(0.0, 100.0)
    }

    /// Availability as a percentage.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "percentage scaling")]
    pub fn availability_score(metrics: &AgentHealthMetrics) -> f64 {
        (metrics.availability * 100.0).clamp(0.0, 100.0)
    }

    /// Two suggestions per violated threshold, then one per group of
    /// degraded capabilities or dependencies.
    #[must_use]
    pub fn recommendations(
        metrics: &AgentHealthMetrics,
        thresholds: &HealthThresholds,
    ) -> Vec<String> {
        let mut advice: Vec<String> = Vec::new();
        let mut suggest =
            |lines: [&str; 2]| advice.extend(lines.iter().map(|line| (*line).to_owned()));

        if thresholds.response_time_exceeded(metrics.response_time_ms) {
            suggest([
                "Consider optimizing agent processing logic to reduce response time",
                "Check for resource bottlenecks or inefficient algorithms",
            ]);
        }
        if thresholds.success_rate_low(metrics.success_rate) {
            suggest([
                "Review error handling and input validation",
                "Check for external service dependencies that may be failing",
            ]);
        }
        if thresholds.error_rate_exceeded(metrics.error_rate) {
            suggest([
                "Implement better error handling and retry mechanisms",
                "Review agent configuration and dependencies",
            ]);
        }
        if thresholds.availability_low(metrics.availability) {
            suggest([
                "Implement health checks and automatic recovery mechanisms",
                "Consider implementing redundancy or failover",
            ]);
        }

        let degraded_capabilities = metrics.capabilities_with(ComponentStatus::Degraded);
        if !degraded_capabilities.is_empty() {
            advice.push(format!(
                "Review and fix degraded capabilities: {}",
                degraded_capabilities.join(", ")
            ));
        }
        let degraded_dependencies = metrics.dependencies_with(ComponentStatus::Degraded);
        if !degraded_dependencies.is_empty() {
            advice.push(format!(
                "Check and fix degraded dependencies: {}",
                degraded_dependencies.join(", ")
            ));
        }
        advice
    }

    /// Conditions well past the thresholds, and failed components.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "critical limits scale thresholds and render percentages"
    )]
    pub fn critical_issues(
        metrics: &AgentHealthMetrics,
        thresholds: &HealthThresholds,
    ) -> Vec<String> {
        let mut issues = Vec::new();
        if metrics.response_time_ms > thresholds.response_time_ms * 2.0 {
            issues.push(format!(
                "Critical: Response time is extremely high ({:.1}ms)",
                metrics.response_time_ms
            ));
        }
        if metrics.success_rate < CRITICAL_SUCCESS_RATE {
            issues.push(format!(
                "Critical: Success rate is critically low ({:.2}%)",
                metrics.success_rate * 100.0
            ));
        }
        if metrics.error_rate > CRITICAL_ERROR_RATE {
            issues.push(format!(
                "Critical: Error rate is critically high ({:.2}%)",
                metrics.error_rate * 100.0
            ));
        }
        if metrics.availability < CRITICAL_AVAILABILITY {
            issues.push(format!(
                "Critical: Availability is critically low ({:.2}%)",
                metrics.availability * 100.0
            ));
        }

        let failed_capabilities = metrics.capabilities_with(ComponentStatus::Failed);
        if !failed_capabilities.is_empty() {
            issues.push(format!(
                "Critical: Failed capabilities: {}",
                failed_capabilities.join(", ")
            ));
        }
        let failed_dependencies = metrics.dependencies_with(ComponentStatus::Failed);
        if !failed_dependencies.is_empty() {
            issues.push(format!(
                "Critical: Failed dependencies: {}",
                failed_dependencies.join(", ")
            ));
        }
        issues
    }
}
