//! Catalog port for available specializations.

use crate::specialization::domain::CatalogSpecialization;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog operations.
pub type SpecializationCatalogResult<T> = Result<T, SpecializationCatalogError>;

/// Source of truth for which specializations exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpecializationCatalog: Send + Sync {
    /// Finds a specialization by identifier.
    async fn get(&self, id: &str) -> SpecializationCatalogResult<Option<CatalogSpecialization>>;

    /// Returns every specialization, ordered by identifier.
    async fn list_all(&self) -> SpecializationCatalogResult<Vec<CatalogSpecialization>>;
}

/// Errors returned by catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum SpecializationCatalogError {
    /// The catalog could not be read.
    #[error("specialization catalog unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl SpecializationCatalogError {
    /// Wraps an underlying failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
