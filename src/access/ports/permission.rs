//! Permission and tenant validation ports.

use crate::access::domain::{AccessAction, AccessResource, CallerContext};
use async_trait::async_trait;

/// Decides whether a caller may perform an action on a resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// Returns `true` when the caller is allowed to act on the resource.
    async fn check_permission(
        &self,
        caller: &CallerContext,
        resource: AccessResource,
        action: AccessAction,
    ) -> bool;
}

/// Decides whether a tenant may use the Curator at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantValidator: Send + Sync {
    /// Returns `true` when the tenant is permitted.
    async fn validate_tenant_access(&self, tenant_id: &str) -> bool;
}
