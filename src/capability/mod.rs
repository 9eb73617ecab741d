//! Capability registry for Curator.
//!
//! Services publish what they can do as [`domain::CapabilityDefinition`]s,
//! keyed by `service.capability`. Registration is an upsert into the local
//! [`ports::CapabilityRepository`]; when an external
//! [`ports::DiscoveryBackend`] is wired in, the definition is also published
//! there on a best-effort basis.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
