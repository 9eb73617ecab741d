//! Health alerts and the per-agent alert log.

use super::{AgentHealthMetrics, ComponentStatus, HealthThresholds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Area an alert concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Response time.
    Performance,
    /// Success or error rate.
    Reliability,
    /// Availability.
    Availability,
    /// A degraded capability.
    Capability,
    /// A degraded dependency.
    Dependency,
}

impl AlertType {
    /// Returns the canonical alert type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Reliability => "reliability",
            Self::Availability => "availability",
            Self::Capability => "capability",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Urgency of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Needs attention.
    Warning,
    /// Needs immediate attention.
    Critical,
}

/// One raised alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAlert {
    /// Area concerned.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Urgency.
    pub severity: AlertSeverity,
    /// Human-readable description.
    pub message: String,
    /// When the alert was raised.
    pub timestamp: DateTime<Utc>,
}

impl HealthAlert {
    /// Whether two alerts describe the same condition, ignoring time.
    #[must_use]
    pub fn same_condition(&self, other: &Self) -> bool {
        self.alert_type == other.alert_type
            && self.severity == other.severity
            && self.message == other.message
    }

    fn raise(
        alert_type: AlertType,
        severity: AlertSeverity,
        message: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            alert_type,
            severity,
            message,
            timestamp,
        }
    }

    /// Derives the alerts implied by an agent's current metrics.
    ///
    /// One alert per violated threshold, then one warning per degraded
    /// capability and per degraded dependency.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "rates are rendered as percentages"
    )]
    pub fn evaluate(
        metrics: &AgentHealthMetrics,
        thresholds: &HealthThresholds,
        now: DateTime<Utc>,
    ) -> Vec<Self> {
        let mut alerts = Vec::new();
        if thresholds.response_time_exceeded(metrics.response_time_ms) {
            alerts.push(Self::raise(
                AlertType::Performance,
                AlertSeverity::Warning,
                format!("High response time: {:.1}ms", metrics.response_time_ms),
                now,
            ));
        }
        if thresholds.success_rate_low(metrics.success_rate) {
            alerts.push(Self::raise(
                AlertType::Reliability,
                AlertSeverity::Critical,
                format!("Low success rate: {:.2}%", metrics.success_rate * 100.0),
                now,
            ));
        }
        if thresholds.error_rate_exceeded(metrics.error_rate) {
            alerts.push(Self::raise(
                AlertType::Reliability,
                AlertSeverity::Critical,
                format!("High error rate: {:.2}%", metrics.error_rate * 100.0),
                now,
            ));
        }
        if thresholds.availability_low(metrics.availability) {
            alerts.push(Self::raise(
                AlertType::Availability,
                AlertSeverity::Warning,
                format!("Low availability: {:.2}%", metrics.availability * 100.0),
                now,
            ));
        }
        for (name, status) in &metrics.capabilities_status {
            if *status == ComponentStatus::Degraded {
                alerts.push(Self::raise(
                    AlertType::Capability,
                    AlertSeverity::Warning,
                    format!("Capability {name} is degraded"),
                    now,
                ));
            }
        }
        for (name, status) in &metrics.dependencies_status {
            if *status == ComponentStatus::Degraded {
                alerts.push(Self::raise(
                    AlertType::Dependency,
                    AlertSeverity::Warning,
                    format!("Dependency {name} is degraded"),
                    now,
                ));
            }
        }
        alerts
    }
}

/// Bounded alert log with duplicate suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLog {
    alerts: VecDeque<HealthAlert>,
    capacity: usize,
    dedup_window: usize,
}

impl AlertLog {
    /// Creates an empty log holding at most `capacity` alerts and comparing
    /// new alerts against the newest `dedup_window` stored ones.
    #[must_use]
    pub fn new(capacity: usize, dedup_window: usize) -> Self {
        Self {
            alerts: VecDeque::new(),
            capacity: capacity.max(1),
            dedup_window,
        }
    }

    /// Whether `alert` matches one of the newest stored alerts.
    #[must_use]
    pub fn is_duplicate(&self, alert: &HealthAlert) -> bool {
        self.alerts
            .iter()
            .rev()
            .take(self.dedup_window)
            .any(|stored| stored.same_condition(alert))
    }

    /// Stores `alert` unless it duplicates a recent one.
    ///
    /// Returns whether the alert was stored. The oldest alert is evicted
    /// when the log is full.
    pub fn push(&mut self, alert: HealthAlert) -> bool {
        if self.is_duplicate(&alert) {
            return false;
        }
        if self.alerts.len() == self.capacity {
            self.alerts.pop_front();
        }
        self.alerts.push_back(alert);
        true
    }

    /// Returns the newest `count` alerts, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<HealthAlert> {
        let skip = self.alerts.len().saturating_sub(count);
        self.alerts.iter().skip(skip).cloned().collect()
    }

    /// Returns the number of stored alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Returns the number of stored critical alerts.
    #[must_use]
    pub fn critical_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Critical)
            .count()
    }
}
