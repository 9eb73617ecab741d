//! Registry and monitor counts reported by [`Curator::status`](super::Curator::status).

use serde::Serialize;

/// Point-in-time sizes of every registry and monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CuratorStatus {
    /// Registered capability definitions.
    pub capabilities: usize,
    /// Registered service protocols.
    pub protocols: usize,
    /// Registered routes.
    pub routes: usize,
    /// Services with mesh policy reports.
    pub policy_services: usize,
    /// Agents with registered capabilities.
    pub capability_agents: usize,
    /// Agents under health monitoring.
    pub monitored_agents: usize,
    /// Agents with a specialization binding.
    pub specialized_agents: usize,
    /// Known specializations.
    pub specializations: usize,
    /// Services found by auto-discovery.
    pub discovered_services: usize,
    /// Running background monitor tasks.
    pub running_monitors: usize,
}
