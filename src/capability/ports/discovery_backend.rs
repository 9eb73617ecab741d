//! External service-discovery backend port.
//!
//! A backend such as Consul mirrors the capability registry for consumers
//! outside the process. Publication is best-effort: the local registry is the
//! source of truth.

use crate::capability::domain::CapabilityDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Service entry published to a discovery backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    /// Unique service identifier; the capability key.
    pub service_id: String,
    /// Service type; the capability's protocol name.
    pub service_type: String,
    /// Capability names served.
    pub capabilities: Vec<String>,
    /// Discovery tags; the capability's realm.
    pub tags: Vec<String>,
    /// Reachable endpoints taken from the contracts.
    pub endpoints: Vec<String>,
    /// Descriptive metadata.
    pub metadata: Value,
}

impl ServiceRegistration {
    /// Builds the backend entry for a capability definition.
    #[must_use]
    pub fn for_capability(definition: &CapabilityDefinition) -> Self {
        Self {
            service_id: definition.key().to_string(),
            service_type: definition.protocol_name().to_owned(),
            capabilities: vec![definition.capability_name().to_owned()],
            tags: vec![definition.realm().to_owned()],
            endpoints: definition.endpoints(),
            metadata: json!({
                "service_name": definition.service_name(),
                "description": definition.description(),
                "version": definition.version(),
                "registered_at": definition.registered_at().to_rfc3339(),
            }),
        }
    }
}

/// External discovery registry contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryBackend: Send + Sync {
    /// Publishes or refreshes a service entry.
    async fn register_service(
        &self,
        registration: &ServiceRegistration,
    ) -> Result<(), DiscoveryBackendError>;

    /// Withdraws a service entry by identifier.
    async fn deregister_service(&self, service_id: &str) -> Result<(), DiscoveryBackendError>;
}

/// Errors returned by discovery backend adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryBackendError {
    /// The backend could not be reached.
    #[error("discovery backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the request.
    #[error("discovery backend rejected request: {0}")]
    Rejected(String),
}
