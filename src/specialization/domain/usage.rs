//! Per-agent specialization usage tracking.

use crate::numeric::ratio;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Usage counters of one agent in its current specialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationUsage {
    /// Total recorded uses.
    pub total_uses: u64,
    /// Successful uses.
    pub successful_uses: u64,
    /// Failed uses.
    pub failed_uses: u64,
    /// Time of the most recent use.
    pub last_used: Option<DateTime<Utc>>,
    /// Uses per capability.
    pub usage_by_capability: BTreeMap<String, u64>,
}

impl SpecializationUsage {
    /// Counts one use.
    pub fn record(&mut self, success: bool, capability: Option<&str>, used_at: DateTime<Utc>) {
        self.total_uses = self.total_uses.saturating_add(1);
        if success {
            self.successful_uses = self.successful_uses.saturating_add(1);
        } else {
            self.failed_uses = self.failed_uses.saturating_add(1);
        }
        self.last_used = Some(used_at);
        if let Some(name) = capability {
            let count = self.usage_by_capability.entry(name.to_owned()).or_default();
            *count = count.saturating_add(1);
        }
    }

    /// Successful share of all uses; zero before the first use.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        ratio(self.successful_uses, self.total_uses)
    }
}
