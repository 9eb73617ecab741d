//! Access decision errors.

use super::{AccessAction, AccessResource};
use thiserror::Error;

/// Reason an operation was refused at the access boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The permission port refused the resource and action.
    #[error("user {user_id} may not {action} {resource}")]
    PermissionDenied {
        /// Refused user.
        user_id: String,
        /// Requested resource.
        resource: AccessResource,
        /// Requested action.
        action: AccessAction,
    },

    /// The tenant validator refused the caller's tenant.
    #[error("tenant {tenant_id} is not permitted")]
    TenantDenied {
        /// Refused tenant.
        tenant_id: String,
    },
}
