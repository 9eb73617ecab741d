//! Service layer for policy reporting and aggregation.

use crate::mesh_policy::{
    domain::{PolicyDomainError, PolicyReport, PolicySnapshot, ServiceMeshPolicyReport},
    ports::{PolicyReportRepository, PolicyReportRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for policy reporting.
#[derive(Debug, Error)]
pub enum ServiceMeshPolicyReporterError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PolicyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PolicyReportRepositoryError),
}

/// Result type for policy reporting operations.
pub type ServiceMeshPolicyReporterResult<T> = Result<T, ServiceMeshPolicyReporterError>;

/// Collects policy reports and serves their aggregate.
#[derive(Clone)]
pub struct ServiceMeshPolicyReporter<R, C>
where
    R: PolicyReportRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ServiceMeshPolicyReporter<R, C>
where
    R: PolicyReportRepository,
    C: Clock + Send + Sync,
{
    /// Creates a reporter.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends a report for `service_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceMeshPolicyReporterError`] when the service name is
    /// blank, the policies are not an object, or the append fails.
    pub async fn report(
        &self,
        service_name: &str,
        snapshot: PolicySnapshot,
    ) -> ServiceMeshPolicyReporterResult<PolicyReport> {
        let report = PolicyReport::new(service_name, snapshot, self.clock.utc())?;
        self.repository.append(&report).await?;
        info!(
            service_name = report.service_name(),
            source = report.source(),
            policies = report.policies().len(),
            "service mesh policies reported"
        );
        Ok(report)
    }

    /// Folds every report for `service_name` into the effective policies.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceMeshPolicyReporterError::Repository`] when the lookup
    /// fails.
    pub async fn aggregate(
        &self,
        service_name: &str,
    ) -> ServiceMeshPolicyReporterResult<ServiceMeshPolicyReport> {
        let service = service_name.trim();
        let reports = self.repository.reports_for(service).await?;
        Ok(ServiceMeshPolicyReport::aggregate(service, &reports))
    }

    /// Returns the number of services with reports.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceMeshPolicyReporterError::Repository`] when the count
    /// fails.
    pub async fn service_count(&self) -> ServiceMeshPolicyReporterResult<usize> {
        Ok(self.repository.service_count().await?)
    }
}
