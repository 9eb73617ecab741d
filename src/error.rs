//! Facade-level error taxonomy for Curator operations.
//!
//! Component services report failures through their own `thiserror` enums.
//! The [`Curator`](crate::curator::Curator) facade folds those into
//! [`CuratorError`], whose [`code`](CuratorError::code) is the stable string
//! carried by failed [`CuratorResponse`](crate::curator::CuratorResponse)s.

use std::fmt;
use thiserror::Error;

/// Kind of registry entry that a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A capability definition keyed by `service.capability`.
    Capability,
    /// A service protocol.
    Protocol,
    /// A registered route.
    Route,
    /// An agent's capability list.
    AgentCapabilities,
    /// An agent's health record.
    AgentHealth,
    /// An agent's specialization binding.
    AgentSpecialization,
    /// A specialization in the catalog.
    Specialization,
    /// A service known to discovery.
    Service,
}

impl ResourceKind {
    /// Returns the human-readable resource name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Capability => "capability",
            Self::Protocol => "protocol",
            Self::Route => "route",
            Self::AgentCapabilities => "agent capabilities",
            Self::AgentHealth => "agent health",
            Self::AgentSpecialization => "agent specialization",
            Self::Specialization => "specialization",
            Self::Service => "service",
        }
    }

    /// Returns the stable `*_NOT_FOUND` error code for this resource.
    #[must_use]
    pub const fn not_found_code(self) -> &'static str {
        match self {
            Self::Capability => "CAPABILITY_NOT_FOUND",
            Self::Protocol => "PROTOCOL_NOT_FOUND",
            Self::Route => "ROUTE_NOT_FOUND",
            Self::AgentCapabilities => "AGENT_CAPABILITIES_NOT_FOUND",
            Self::AgentHealth => "AGENT_HEALTH_NOT_FOUND",
            Self::AgentSpecialization => "AGENT_SPECIALIZATION_NOT_FOUND",
            Self::Specialization => "SPECIALIZATION_NOT_FOUND",
            Self::Service => "SERVICE_NOT_FOUND",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by Curator entry points.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CuratorError {
    /// The caller lacks permission for the requested resource and action.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The caller's tenant failed validation.
    #[error("tenant access denied: {0}")]
    TenantAccessDenied(String),

    /// Input was missing a required field or was malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested entry does not exist.
    #[error("{resource} not found: {key}")]
    NotFound {
        /// Kind of entry that was looked up.
        resource: ResourceKind,
        /// Lookup key.
        key: String,
    },

    /// An external backend could not be reached.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// An unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CuratorError {
    /// Creates a not-found error for the given resource and key.
    #[must_use]
    pub fn not_found(resource: ResourceKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            key: key.into(),
        }
    }

    /// Returns the stable error code reported to callers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied(_) => "ACCESS_DENIED",
            Self::TenantAccessDenied(_) => "TENANT_ACCESS_DENIED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { resource, .. } => resource.not_found_code(),
            Self::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether the error reflects caller input rather than a fault.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied(_)
                | Self::TenantAccessDenied(_)
                | Self::Validation(_)
                | Self::NotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CuratorError, ResourceKind};
    use rstest::rstest;

    #[rstest]
    #[case(CuratorError::AccessDenied("x".to_owned()), "ACCESS_DENIED")]
    #[case(CuratorError::TenantAccessDenied("t".to_owned()), "TENANT_ACCESS_DENIED")]
    #[case(CuratorError::Validation("v".to_owned()), "VALIDATION_ERROR")]
    #[case(CuratorError::not_found(ResourceKind::Capability, "a.b"), "CAPABILITY_NOT_FOUND")]
    #[case(
        CuratorError::not_found(ResourceKind::AgentSpecialization, "agent"),
        "AGENT_SPECIALIZATION_NOT_FOUND"
    )]
    #[case(CuratorError::BackendUnavailable("consul".to_owned()), "BACKEND_UNAVAILABLE")]
    #[case(CuratorError::Internal("boom".to_owned()), "INTERNAL_ERROR")]
    fn codes_are_stable(#[case] error: CuratorError, #[case] code: &str) {
        assert_eq!(error.code(), code);
    }

    #[test]
    fn not_found_message_names_resource_and_key() {
        let error = CuratorError::not_found(ResourceKind::Route, "route-1");
        assert_eq!(error.to_string(), "route not found: route-1");
    }
}
