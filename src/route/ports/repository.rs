//! Repository port for routes.

use crate::route::domain::{Route, RouteFilter, RouteId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for route repository operations.
pub type RouteRepositoryResult<T> = Result<T, RouteRepositoryError>;

/// Route persistence contract.
///
/// Implementations keep their secondary indexes consistent with the primary
/// map on every write.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Inserts or replaces a route, returning the replaced one.
    async fn upsert(&self, route: &Route) -> RouteRepositoryResult<Option<Route>>;

    /// Finds a route by id.
    async fn find(&self, route_id: &RouteId) -> RouteRepositoryResult<Option<Route>>;

    /// Returns routes matching every criterion of `filter`, ordered by id.
    async fn discover(&self, filter: &RouteFilter) -> RouteRepositoryResult<Vec<Route>>;

    /// Returns the number of stored routes.
    async fn count(&self) -> RouteRepositoryResult<usize>;
}

/// Errors returned by route repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RouteRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RouteRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
