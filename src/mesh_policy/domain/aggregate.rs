//! Aggregate policy view for one service.

use super::PolicyReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source of the aggregate when a service has no reports.
pub const NO_POLICIES_SOURCE: &str = "no_policies_reported";

/// Source of the aggregate when at least one report was folded.
pub const AGGREGATED_SOURCE: &str = "aggregated";

/// Effective policies of a service after folding its reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMeshPolicyReport {
    /// Service the policies apply to.
    pub service_name: String,
    /// `aggregated`, or `no_policies_reported` when nothing was folded.
    pub source: String,
    /// Effective policy values.
    pub policies: Map<String, Value>,
    /// Number of reports folded.
    pub report_count: usize,
    /// Contributing sources, distinct, in first-seen order.
    pub sources: Vec<String>,
    /// Arrival time of the newest folded report.
    pub last_reported_at: Option<DateTime<Utc>>,
}

impl ServiceMeshPolicyReport {
    /// Folds reports in arrival order; later values win per key.
    #[must_use]
    pub fn aggregate(service_name: &str, reports: &[PolicyReport]) -> Self {
        if reports.is_empty() {
            return Self {
                service_name: service_name.to_owned(),
                source: NO_POLICIES_SOURCE.to_owned(),
                policies: Map::new(),
                report_count: 0,
                sources: Vec::new(),
                last_reported_at: None,
            };
        }

        let mut policies = Map::new();
        let mut sources: Vec<String> = Vec::new();
        for report in reports {
            for (key, value) in report.policies() {
                policies.insert(key.clone(), value.clone());
            }
            if !sources.iter().any(|known| known == report.source()) {
                sources.push(report.source().to_owned());
            }
        }

        Self {
            service_name: service_name.to_owned(),
            source: AGGREGATED_SOURCE.to_owned(),
            policies,
            report_count: reports.len(),
            sources,
            last_reported_at: reports.last().map(PolicyReport::reported_at),
        }
    }

    /// Returns whether any report contributed.
    #[must_use]
    pub fn has_reports(&self) -> bool {
        self.report_count > 0
    }
}
