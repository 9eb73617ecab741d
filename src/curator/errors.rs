//! Mapping of component errors onto the facade taxonomy.

use crate::access::domain::AccessError;
use crate::agent_capability::services::AgentCapabilityRegistryError;
use crate::agent_health::adapters::ReportedProbeError;
use crate::agent_health::services::AgentHealthMonitorError;
use crate::capability::services::CapabilityRegistryServiceError;
use crate::discovery::services::AutoDiscoveryError;
use crate::error::{CuratorError, ResourceKind};
use crate::mesh_policy::services::ServiceMeshPolicyReporterError;
use crate::monitor::MonitorError;
use crate::protocol::services::ProtocolRegistryServiceError;
use crate::route::services::RouteRegistryServiceError;
use crate::specialization::services::AgentSpecializationRegistryError;

impl From<AccessError> for CuratorError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::PermissionDenied { .. } => Self::AccessDenied(err.to_string()),
            AccessError::TenantDenied { .. } => Self::TenantAccessDenied(err.to_string()),
        }
    }
}

impl From<MonitorError> for CuratorError {
    fn from(err: MonitorError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<CapabilityRegistryServiceError> for CuratorError {
    fn from(err: CapabilityRegistryServiceError) -> Self {
        match err {
            CapabilityRegistryServiceError::Domain(inner) => Self::Validation(inner.to_string()),
            CapabilityRegistryServiceError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl From<ProtocolRegistryServiceError> for CuratorError {
    fn from(err: ProtocolRegistryServiceError) -> Self {
        match err {
            ProtocolRegistryServiceError::Domain(inner) => Self::Validation(inner.to_string()),
            ProtocolRegistryServiceError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl From<RouteRegistryServiceError> for CuratorError {
    fn from(err: RouteRegistryServiceError) -> Self {
        match err {
            RouteRegistryServiceError::Domain(inner) => Self::Validation(inner.to_string()),
            RouteRegistryServiceError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl From<ServiceMeshPolicyReporterError> for CuratorError {
    fn from(err: ServiceMeshPolicyReporterError) -> Self {
        match err {
            ServiceMeshPolicyReporterError::Domain(inner) => Self::Validation(inner.to_string()),
            ServiceMeshPolicyReporterError::Repository(inner) => Self::Internal(inner.to_string()),
        }
    }
}

impl From<AgentCapabilityRegistryError> for CuratorError {
    fn from(err: AgentCapabilityRegistryError) -> Self {
        match err {
            AgentCapabilityRegistryError::Domain(inner) => Self::Validation(inner.to_string()),
            AgentCapabilityRegistryError::Monitor(inner) => inner.into(),
            AgentCapabilityRegistryError::StatePoisoned(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AgentHealthMonitorError> for CuratorError {
    fn from(err: AgentHealthMonitorError) -> Self {
        match err {
            AgentHealthMonitorError::Domain(inner) => Self::Validation(inner.to_string()),
            AgentHealthMonitorError::Probe(inner) => Self::BackendUnavailable(inner.to_string()),
            AgentHealthMonitorError::NotMonitored(agent_id) => {
                Self::not_found(ResourceKind::AgentHealth, agent_id)
            }
            AgentHealthMonitorError::Monitor(inner) => inner.into(),
            AgentHealthMonitorError::StatePoisoned(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<ReportedProbeError> for CuratorError {
    fn from(err: ReportedProbeError) -> Self {
        match err {
            ReportedProbeError::Domain(inner) => Self::Validation(inner.to_string()),
            ReportedProbeError::StatePoisoned(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AgentSpecializationRegistryError> for CuratorError {
    fn from(err: AgentSpecializationRegistryError) -> Self {
        match err {
            AgentSpecializationRegistryError::Domain(inner) => Self::Validation(inner.to_string()),
            AgentSpecializationRegistryError::UnknownSpecialization(id) => {
                Self::not_found(ResourceKind::Specialization, id)
            }
            AgentSpecializationRegistryError::NotRegistered(agent_id) => {
                Self::not_found(ResourceKind::AgentSpecialization, agent_id)
            }
            AgentSpecializationRegistryError::Catalog(inner) => {
                Self::BackendUnavailable(inner.to_string())
            }
            AgentSpecializationRegistryError::Monitor(inner) => inner.into(),
            AgentSpecializationRegistryError::StatePoisoned(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AutoDiscoveryError> for CuratorError {
    fn from(err: AutoDiscoveryError) -> Self {
        match err {
            AutoDiscoveryError::Directory(inner) => Self::BackendUnavailable(inner.to_string()),
            AutoDiscoveryError::StatePoisoned(_) => Self::Internal(err.to_string()),
        }
    }
}
