//! Agent health monitoring for Curator.
//!
//! Each monitored agent gets a metrics record, a bounded history, and an alert
//! log. A background task per agent polls an [`ports::AgentHealthProbe`],
//! classifies the observation against [`domain::HealthThresholds`], appends
//! to the history, and raises deduplicated alerts. Reports derive scores,
//! trends, recommendations, and critical issues from that state.
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
