//! Port contracts for capability persistence and external publication.

pub mod discovery_backend;
pub mod repository;

pub use discovery_backend::{DiscoveryBackend, DiscoveryBackendError, ServiceRegistration};
pub use repository::{CapabilityRepository, CapabilityRepositoryError, CapabilityRepositoryResult};

#[cfg(test)]
pub use discovery_backend::MockDiscoveryBackend;
