//! Caller identity and the resources it acts upon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the caller invoking a Curator operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerContext {
    user_id: String,
    tenant_id: Option<String>,
}

impl CallerContext {
    /// Creates a caller context for a user with no tenant.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id: None,
        }
    }

    /// Associates the caller with a tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the tenant identifier, when one is set.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }
}

/// Action requested on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    /// Query without side effects.
    Read,
    /// Registration, update, or removal.
    Write,
}

impl AccessAction {
    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Resource names checked by the permission port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessResource {
    /// Capability definitions.
    CapabilityRegistry,
    /// Service protocols.
    ProtocolRegistry,
    /// Routes and their indexes.
    RouteRegistry,
    /// Service-mesh policy reports.
    ServiceMeshPolicies,
    /// Agent capability lists and usage.
    AgentCapabilityRegistry,
    /// Agent health records.
    AgentHealthMonitoring,
    /// Agent specialization bindings.
    AgentSpecializationManagement,
    /// Service auto-discovery.
    AutoDiscovery,
}

impl AccessResource {
    /// Returns the canonical resource name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CapabilityRegistry => "capability_registry",
            Self::ProtocolRegistry => "protocol_registry",
            Self::RouteRegistry => "route_registry",
            Self::ServiceMeshPolicies => "service_mesh_policies",
            Self::AgentCapabilityRegistry => "agent_capability_registry",
            Self::AgentHealthMonitoring => "agent_health_monitoring",
            Self::AgentSpecializationManagement => "agent_specialization_management",
            Self::AutoDiscovery => "auto_discovery",
        }
    }
}

impl fmt::Display for AccessResource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
