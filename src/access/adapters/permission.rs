//! Permission adapters for embedding and tests.

use crate::access::{
    domain::{AccessAction, AccessResource, CallerContext},
    ports::{PermissionChecker, TenantValidator},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Grants every permission and accepts every tenant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl PermissionChecker for AllowAll {
    async fn check_permission(
        &self,
        _caller: &CallerContext,
        _resource: AccessResource,
        _action: AccessAction,
    ) -> bool {
        true
    }
}

#[async_trait]
impl TenantValidator for AllowAll {
    async fn validate_tenant_access(&self, _tenant_id: &str) -> bool {
        true
    }
}

type Grant = (AccessResource, AccessAction);

/// Permission checker backed by an explicit grant table.
///
/// Users without grants are refused everything.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionChecker {
    grants: Arc<RwLock<HashMap<String, HashSet<Grant>>>>,
}

impl StaticPermissionChecker {
    /// Creates a checker with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `action` on `resource` to `user_id`.
    #[must_use]
    pub fn with_grant(
        self,
        user_id: impl Into<String>,
        resource: AccessResource,
        action: AccessAction,
    ) -> Self {
        if let Ok(mut grants) = self.grants.write() {
            grants
                .entry(user_id.into())
                .or_default()
                .insert((resource, action));
        }
        self
    }
}

#[async_trait]
impl PermissionChecker for StaticPermissionChecker {
    async fn check_permission(
        &self,
        caller: &CallerContext,
        resource: AccessResource,
        action: AccessAction,
    ) -> bool {
        self.grants.read().is_ok_and(|grants| {
            grants
                .get(caller.user_id())
                .is_some_and(|granted| granted.contains(&(resource, action)))
        })
    }
}

/// Tenant validator accepting a fixed set of tenants.
#[derive(Debug, Clone, Default)]
pub struct StaticTenantValidator {
    allowed: HashSet<String>,
}

impl StaticTenantValidator {
    /// Creates a validator accepting the given tenants.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TenantValidator for StaticTenantValidator {
    async fn validate_tenant_access(&self, tenant_id: &str) -> bool {
        self.allowed.contains(tenant_id)
    }
}
