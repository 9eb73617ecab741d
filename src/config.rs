//! Runtime configuration for the Curator core.
//!
//! [`CuratorConfig`] aggregates one section per background component. Every
//! section implements [`Default`] with production cadences and deserializes
//! with `#[serde(default)]`, so a JSON document only needs to name the values
//! it overrides.

use crate::agent_health::domain::HealthThresholds;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Error raised when a configuration document cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid curator configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Top-level Curator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Agent health monitoring.
    pub health: HealthMonitorConfig,
    /// Per-agent capability monitoring.
    pub capability_monitor: CapabilityMonitorConfig,
    /// Specialization analytics rollup.
    pub specialization: SpecializationAnalyticsConfig,
    /// External discovery backend bridge.
    pub discovery_backend: DiscoveryBackendConfig,
}

impl CuratorConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Configuration with every background task disabled.
    ///
    /// State transitions still happen; callers drive checks explicitly.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            health: HealthMonitorConfig {
                enabled: false,
                ..HealthMonitorConfig::default()
            },
            capability_monitor: CapabilityMonitorConfig {
                enabled: false,
                ..CapabilityMonitorConfig::default()
            },
            specialization: SpecializationAnalyticsConfig {
                analytics_enabled: false,
                ..SpecializationAnalyticsConfig::default()
            },
            discovery_backend: DiscoveryBackendConfig { timeout_ms: 200 },
        }
    }
}

/// Agent health monitor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMonitorConfig {
    /// Spawn one periodic health task per monitored agent.
    pub enabled: bool,
    /// Seconds between health checks.
    pub check_interval_secs: u64,
    /// Status classification thresholds.
    pub thresholds: HealthThresholds,
    /// Entries kept per agent in the health history ring buffer.
    pub history_capacity: usize,
    /// History entries used for trend analysis.
    pub trend_window: usize,
    /// Stored alerts consulted when suppressing duplicates.
    pub alert_dedup_window: usize,
    /// Alerts exposed on the metrics record.
    pub alert_retention: usize,
    /// Alerts kept per agent in the alert log.
    pub alert_log_capacity: usize,
}

impl HealthMonitorConfig {
    /// Returns the check interval as a [`Duration`].
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_secs: 30,
            thresholds: HealthThresholds::default(),
            history_capacity: 100,
            trend_window: 10,
            alert_dedup_window: 5,
            alert_retention: 10,
            alert_log_capacity: 100,
        }
    }
}

/// Agent capability monitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityMonitorConfig {
    /// Spawn one periodic capability check per registered agent.
    pub enabled: bool,
    /// Seconds between capability checks.
    pub check_interval_secs: u64,
    /// Days after registration an unused capability is flagged.
    pub unused_after_days: i64,
}

impl CapabilityMonitorConfig {
    /// Returns the check interval as a [`Duration`].
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

impl Default for CapabilityMonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_secs: 30,
            unused_after_days: 7,
        }
    }
}

/// Specialization analytics rollup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecializationAnalyticsConfig {
    /// Run the periodic analytics rollup.
    pub analytics_enabled: bool,
    /// Seconds between rollups.
    pub analytics_interval_secs: u64,
}

impl SpecializationAnalyticsConfig {
    /// Returns the rollup interval as a [`Duration`].
    #[must_use]
    pub const fn analytics_interval(&self) -> Duration {
        Duration::from_secs(self.analytics_interval_secs)
    }
}

impl Default for SpecializationAnalyticsConfig {
    fn default() -> Self {
        Self {
            analytics_enabled: true,
            analytics_interval_secs: 300,
        }
    }
}

/// External discovery backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryBackendConfig {
    /// Milliseconds allowed for one backend call.
    pub timeout_ms: u64,
}

impl DiscoveryBackendConfig {
    /// Returns the backend call timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DiscoveryBackendConfig {
    fn default() -> Self {
        Self { timeout_ms: 2_000 }
    }
}

#[cfg(test)]
mod tests {
    use super::CuratorConfig;
    use std::time::Duration;

    #[test]
    fn defaults_match_production_cadences() {
        let config = CuratorConfig::default();
        assert!(config.health.enabled);
        assert_eq!(config.health.check_interval(), Duration::from_secs(30));
        assert_eq!(config.health.history_capacity, 100);
        assert_eq!(config.capability_monitor.unused_after_days, 7);
        assert_eq!(
            config.specialization.analytics_interval(),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn partial_document_keeps_unnamed_defaults() {
        let config = CuratorConfig::from_json_str(
            r#"{"health": {"check_interval_secs": 5, "thresholds": {"success_rate": 0.9}}}"#,
        )
        .expect("partial configuration should parse");

        assert_eq!(config.health.check_interval_secs, 5);
        assert_eq!(config.health.alert_dedup_window, 5);
        assert_eq!(config.health.thresholds.response_time_ms, 5_000.0);
        assert_eq!(config.health.thresholds.success_rate, 0.9);
        assert!(config.capability_monitor.enabled);
    }

    #[test]
    fn malformed_document_is_rejected() {
        let result = CuratorConfig::from_json_str(r#"{"health": {"enabled": "yes"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_disables_background_tasks() {
        let config = CuratorConfig::for_tests();
        assert!(!config.health.enabled);
        assert!(!config.capability_monitor.enabled);
        assert!(!config.specialization.analytics_enabled);
    }
}
