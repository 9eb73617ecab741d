//! Orchestration services for agent capabilities.

mod registry;

pub use registry::{
    AgentCapabilityRegistration, AgentCapabilityRegistry, AgentCapabilityRegistryError,
    AgentCapabilityRegistryResult,
};
