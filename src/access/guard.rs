//! Access guard applied at every Curator entry point.

use super::{
    adapters::{AllowAll, NoopMetricsSink},
    domain::{AccessAction, AccessError, AccessResource, CallerContext},
    ports::{MetricsSink, PermissionChecker, TenantValidator},
};
use std::sync::Arc;
use tracing::warn;

/// Permission, tenant, and metrics plumbing shared by every operation.
#[derive(Clone)]
pub struct AccessGuard {
    permissions: Arc<dyn PermissionChecker>,
    tenants: Arc<dyn TenantValidator>,
    metrics: Arc<dyn MetricsSink>,
}

impl AccessGuard {
    /// Creates a guard over the given ports.
    #[must_use]
    pub fn new(
        permissions: Arc<dyn PermissionChecker>,
        tenants: Arc<dyn TenantValidator>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            permissions,
            tenants,
            metrics,
        }
    }

    /// Guard that admits every caller and discards metrics.
    #[must_use]
    pub fn permissive() -> Self {
        Self::new(
            Arc::new(AllowAll),
            Arc::new(AllowAll),
            Arc::new(NoopMetricsSink),
        )
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Checks whether `caller` may perform `action` on `resource`.
    ///
    /// Anonymous calls (no context) are internal and always admitted. A
    /// context carrying a tenant must also pass tenant validation.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PermissionDenied`] when the permission port
    /// refuses, or [`AccessError::TenantDenied`] when the tenant is refused.
    pub async fn authorize(
        &self,
        caller: Option<&CallerContext>,
        resource: AccessResource,
        action: AccessAction,
        operation: &str,
    ) -> Result<(), AccessError> {
        let Some(context) = caller else {
            return Ok(());
        };

        if !self
            .permissions
            .check_permission(context, resource, action)
            .await
        {
            warn!(
                user_id = context.user_id(),
                %resource,
                %action,
                operation,
                "curator access denied"
            );
            self.record(operation, "access_denied");
            return Err(AccessError::PermissionDenied {
                user_id: context.user_id().to_owned(),
                resource,
                action,
            });
        }

        if let Some(tenant_id) = context.tenant_id()
            && !self.tenants.validate_tenant_access(tenant_id).await
        {
            warn!(tenant_id, operation, "curator tenant access denied");
            self.record(operation, "tenant_denied");
            return Err(AccessError::TenantDenied {
                tenant_id: tenant_id.to_owned(),
            });
        }

        Ok(())
    }

    /// Records one operation outcome as a counter sample.
    pub fn record(&self, operation: &str, outcome: &str) {
        self.metrics.record(
            &format!("curator_{operation}_{outcome}"),
            1.0,
            &[("operation", operation), ("outcome", outcome)],
        );
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("AccessGuard").finish_non_exhaustive()
    }
}
