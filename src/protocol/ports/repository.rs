//! Repository port for service protocols.

use crate::protocol::domain::{ProtocolKey, ServiceProtocol};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for protocol repository operations.
pub type ProtocolRepositoryResult<T> = Result<T, ProtocolRepositoryError>;

/// Protocol persistence contract. Listings are ordered by key.
#[async_trait]
pub trait ProtocolRepository: Send + Sync {
    /// Inserts or replaces a protocol, returning the replaced one.
    async fn upsert(
        &self,
        protocol: &ServiceProtocol,
    ) -> ProtocolRepositoryResult<Option<ServiceProtocol>>;

    /// Finds a protocol by key.
    async fn find(&self, key: &ProtocolKey) -> ProtocolRepositoryResult<Option<ServiceProtocol>>;

    /// Lists protocols, optionally only those of one service.
    async fn list(&self, service_name: Option<&str>)
    -> ProtocolRepositoryResult<Vec<ServiceProtocol>>;

    /// Returns the number of stored protocols.
    async fn count(&self) -> ProtocolRepositoryResult<usize>;
}

/// Errors returned by protocol repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProtocolRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProtocolRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
