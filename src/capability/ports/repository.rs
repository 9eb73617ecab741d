//! Repository port for capability definitions.

use crate::capability::domain::{CapabilityDefinition, CapabilityKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for capability repository operations.
pub type CapabilityRepositoryResult<T> = Result<T, CapabilityRepositoryError>;

/// Capability definition persistence contract.
///
/// Listing operations return definitions ordered by key.
#[async_trait]
pub trait CapabilityRepository: Send + Sync {
    /// Inserts or replaces the definition stored under its key.
    ///
    /// Returns the definition that was replaced, if any.
    async fn upsert(
        &self,
        definition: &CapabilityDefinition,
    ) -> CapabilityRepositoryResult<Option<CapabilityDefinition>>;

    /// Finds a definition by key.
    async fn find(
        &self,
        key: &CapabilityKey,
    ) -> CapabilityRepositoryResult<Option<CapabilityDefinition>>;

    /// Returns every definition.
    async fn list_all(&self) -> CapabilityRepositoryResult<Vec<CapabilityDefinition>>;

    /// Removes the definition stored under `key`, returning it.
    async fn remove(
        &self,
        key: &CapabilityKey,
    ) -> CapabilityRepositoryResult<Option<CapabilityDefinition>>;

    /// Returns the number of stored definitions.
    async fn count(&self) -> CapabilityRepositoryResult<usize>;
}

/// Errors returned by capability repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CapabilityRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CapabilityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
