//! Orchestration services for the protocol registry.

mod registry;

pub use registry::{
    ProtocolRegistryService, ProtocolRegistryServiceError, ProtocolRegistryServiceResult,
};
