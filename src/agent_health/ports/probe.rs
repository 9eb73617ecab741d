//! Health probe port.

use crate::agent_health::domain::HealthObservation;
use async_trait::async_trait;
use thiserror::Error;

/// Source of health observations for monitored agents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentHealthProbe: Send + Sync {
    /// Samples the current health of `agent_id`.
    async fn observe(&self, agent_id: &str) -> Result<HealthObservation, ProbeError>;
}

/// Errors returned by health probes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Nothing has been observed for the agent yet.
    #[error("no health observation available for agent {0}")]
    NoObservation(String),

    /// The agent could not be sampled.
    #[error("agent {agent_id} could not be probed: {reason}")]
    Unreachable {
        /// Probed agent.
        agent_id: String,
        /// Failure description.
        reason: String,
    },
}
