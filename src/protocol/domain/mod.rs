//! Domain model for service protocols.

mod error;
mod protocol;

pub use error::ProtocolDomainError;
pub use protocol::{MethodContract, ProtocolKey, ServiceProtocol};
