//! Port contracts for protocol persistence.

pub mod repository;

pub use repository::{ProtocolRepository, ProtocolRepositoryError, ProtocolRepositoryResult};
