//! Capability domain validation errors.

use thiserror::Error;

/// Validation failures for capability definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityDomainError {
    /// The owning service name was blank.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// The owning service name contained the key separator.
    #[error("service name '{0}' must not contain '.'")]
    DottedServiceName(String),

    /// The capability name was blank.
    #[error("capability name must not be empty")]
    EmptyCapabilityName,

    /// A capability key supplied for lookup was blank.
    #[error("malformed capability key '{0}'")]
    MalformedKey(String),
}

/// Error returned when parsing an unknown contract kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contract kind: {0}")]
pub struct ParseContractKindError(pub String);
