//! Protocol domain validation errors.

use thiserror::Error;

/// Validation failures for service protocols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolDomainError {
    /// The service name was blank.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// The protocol name was blank.
    #[error("protocol name must not be empty")]
    EmptyProtocolName,

    /// A method name was blank.
    #[error("protocol {protocol_name} declares a method with an empty name")]
    EmptyMethodName {
        /// Protocol declaring the method.
        protocol_name: String,
    },
}
