//! Append-only repository port for policy reports.

use crate::mesh_policy::domain::PolicyReport;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for policy report repository operations.
pub type PolicyReportRepositoryResult<T> = Result<T, PolicyReportRepositoryError>;

/// Policy report persistence contract. Stored reports are never modified.
#[async_trait]
pub trait PolicyReportRepository: Send + Sync {
    /// Appends a report to its service's log.
    async fn append(&self, report: &PolicyReport) -> PolicyReportRepositoryResult<()>;

    /// Returns a service's reports in arrival order.
    async fn reports_for(&self, service_name: &str)
    -> PolicyReportRepositoryResult<Vec<PolicyReport>>;

    /// Returns the number of services with at least one report.
    async fn service_count(&self) -> PolicyReportRepositoryResult<usize>;
}

/// Errors returned by policy report repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PolicyReportRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PolicyReportRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
