//! Specialization domain errors.

use thiserror::Error;

/// Validation failures for specialization bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecializationDomainError {
    /// The agent identifier was blank.
    #[error("agent_id must not be empty")]
    EmptyAgentId,

    /// The specialization identifier was blank.
    #[error("specialization id must not be empty")]
    EmptySpecializationId,
}

/// Error returned when parsing an unknown expertise level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown expertise level: {0}")]
pub struct ParseExpertiseLevelError(pub String);
