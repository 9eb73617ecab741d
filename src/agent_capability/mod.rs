//! Agent capability registry for Curator.
//!
//! Agents publish the capabilities they offer together with the pillar and
//! specialization they serve. The registry keeps each agent's list, a global
//! `capability_name → agent_id` index, fleet-wide usage statistics, and the
//! result of a periodic per-agent capability health check.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
