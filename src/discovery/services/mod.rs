//! Discovery orchestration services.

mod auto_discovery;
mod provider;

pub use auto_discovery::{AutoDiscoveryError, AutoDiscoveryResult, AutoDiscoveryService};
pub use provider::{LocatedService, ProviderChain, ServiceProvider};

#[cfg(test)]
pub use provider::MockServiceProvider;
