//! Orchestration services for agent specializations.

mod registry;

pub use registry::{
    AgentSpecializationRegistry, AgentSpecializationRegistryError,
    AgentSpecializationRegistryResult,
};
