//! Orchestration services for the capability registry.

mod registry;

pub use registry::{
    CapabilityRegistration, CapabilityRegistryService, CapabilityRegistryServiceError,
    CapabilityRegistryServiceResult, CapabilityRemoval, RegisterCapabilityRequest,
};
