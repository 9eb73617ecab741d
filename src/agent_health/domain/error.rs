//! Agent health domain errors.

use thiserror::Error;

/// Validation failures for agent health inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthDomainError {
    /// The agent identifier was blank.
    #[error("agent_id must not be empty")]
    EmptyAgentId,

    /// An observation field was negative, non-finite, or out of range.
    #[error("observation field {field} is out of range")]
    InvalidObservation {
        /// Offending field.
        field: &'static str,
    },
}

/// Error returned when parsing an unknown health status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown health status: {0}")]
pub struct ParseHealthStatusError(pub String);
