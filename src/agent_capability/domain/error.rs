//! Agent capability domain errors.

use thiserror::Error;

/// Validation failures for agent capability registrations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentCapabilityDomainError {
    /// The agent identifier was blank.
    #[error("agent_id must not be empty")]
    EmptyAgentId,

    /// A capability name was blank.
    #[error("capability name must not be empty")]
    EmptyCapabilityName,

    /// The same capability name appeared twice in one registration.
    #[error("capability {0} is listed more than once")]
    DuplicateCapabilityName(String),
}

/// Error returned when parsing an unknown capability status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability status: {0}")]
pub struct ParseCapabilityStatusError(pub String);
