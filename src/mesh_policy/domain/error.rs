//! Policy report validation errors.

use thiserror::Error;

/// Validation failures for policy reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyDomainError {
    /// The service name was blank.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// The reported policies were not a JSON object.
    #[error("policies must be a JSON object, got {0}")]
    PoliciesNotAnObject(&'static str),
}
