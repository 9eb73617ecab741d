//! In-memory append-only policy report log.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::mesh_policy::{
    domain::PolicyReport,
    ports::{PolicyReportRepository, PolicyReportRepositoryError, PolicyReportRepositoryResult},
};

/// Thread-safe in-memory policy report log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPolicyReportRepository {
    reports: Arc<RwLock<HashMap<String, Vec<PolicyReport>>>>,
}

impl InMemoryPolicyReportRepository {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> PolicyReportRepositoryError {
    PolicyReportRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PolicyReportRepository for InMemoryPolicyReportRepository {
    async fn append(&self, report: &PolicyReport) -> PolicyReportRepositoryResult<()> {
        let mut reports = self.reports.write().map_err(poisoned)?;
        reports
            .entry(report.service_name().to_owned())
            .or_default()
            .push(report.clone());
        Ok(())
    }

    async fn reports_for(
        &self,
        service_name: &str,
    ) -> PolicyReportRepositoryResult<Vec<PolicyReport>> {
        let reports = self.reports.read().map_err(poisoned)?;
        Ok(reports.get(service_name).cloned().unwrap_or_default())
    }

    async fn service_count(&self) -> PolicyReportRepositoryResult<usize> {
        let reports = self.reports.read().map_err(poisoned)?;
        Ok(reports.len())
    }
}
