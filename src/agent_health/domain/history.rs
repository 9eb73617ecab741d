//! Bounded per-agent health history.

use super::{AgentHealthMetrics, HealthStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One history sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthHistoryEntry {
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Classified status.
    pub status: HealthStatus,
    /// Response time in milliseconds.
    pub response_time_ms: f64,
    /// Success rate.
    pub success_rate: f64,
    /// Error rate.
    pub error_rate: f64,
    /// Availability.
    pub availability: f64,
}

impl HealthHistoryEntry {
    /// Captures the headline figures of `metrics`.
    #[must_use]
    pub const fn capture(metrics: &AgentHealthMetrics, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            status: metrics.overall_status,
            response_time_ms: metrics.response_time_ms,
            success_rate: metrics.success_rate,
            error_rate: metrics.error_rate,
            availability: metrics.availability,
        }
    }
}

/// Ring buffer of history samples; the oldest sample is evicted when full.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthHistory {
    entries: VecDeque<HealthHistoryEntry>,
    capacity: usize,
}

impl HealthHistory {
    /// Creates an empty history holding at most `capacity` samples.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let bounded = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded),
            capacity: bounded,
        }
    }

    /// Appends a sample, evicting the oldest when full.
    pub fn push(&mut self, entry: HealthHistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns every sample, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<HealthHistoryEntry> {
        self.entries.iter().copied().collect()
    }

    /// Returns the newest `count` samples, oldest first.
    #[must_use]
    pub fn latest(&self, count: usize) -> Vec<HealthHistoryEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).copied().collect()
    }

    /// Returns the number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no sample is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
