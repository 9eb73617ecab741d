//! Agent specialization management for Curator.
//!
//! Binds agents to specializations drawn from an optional
//! [`ports::SpecializationCatalog`], tracks per-agent usage and success
//! rates, and periodically rolls the live records up into per-specialization
//! analytics and a fleet health report.
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
