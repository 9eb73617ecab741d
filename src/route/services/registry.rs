//! Service layer for route registration and discovery.

use crate::route::{
    domain::{Route, RouteDomainError, RouteFilter, RouteId, RouteMetadata},
    ports::{RouteRepository, RouteRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for route registry operations.
#[derive(Debug, Error)]
pub enum RouteRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RouteDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RouteRepositoryError),
}

/// Result type for route registry service operations.
pub type RouteRegistryServiceResult<T> = Result<T, RouteRegistryServiceError>;

/// Route registration and discovery service.
#[derive(Clone)]
pub struct RouteRegistryService<R, C>
where
    R: RouteRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

fn normalise(filter: RouteFilter) -> RouteFilter {
    let clean = |value: Option<String>| {
        value
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
    };
    RouteFilter {
        pillar: clean(filter.pillar),
        realm: clean(filter.realm),
        service_name: clean(filter.service_name),
    }
}

impl<R, C> RouteRegistryService<R, C>
where
    R: RouteRepository,
    C: Clock + Send + Sync,
{
    /// Creates a route registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a route, replacing any route with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRegistryServiceError`] when the id or path is blank or
    /// the repository rejects the write.
    pub async fn register_route(
        &self,
        metadata: RouteMetadata,
    ) -> RouteRegistryServiceResult<Route> {
        let route = Route::new(metadata, self.clock.utc())?;
        let previous = self.repository.upsert(&route).await?;
        info!(
            route_id = %route.id(),
            path = route.path(),
            pillar = route.pillar().unwrap_or("-"),
            replaced = previous.is_some(),
            "route registered"
        );
        Ok(route)
    }

    /// Returns routes matching every criterion of `filter`, ordered by id.
    ///
    /// Blank criteria are ignored; an empty filter returns every route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRegistryServiceError::Repository`] when the lookup
    /// fails.
    pub async fn discover_routes(
        &self,
        filter: RouteFilter,
    ) -> RouteRegistryServiceResult<Vec<Route>> {
        let effective = normalise(filter);
        let routes = self.repository.discover(&effective).await?;
        debug!(matched = routes.len(), "routes discovered");
        Ok(routes)
    }

    /// Finds a route by id.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRegistryServiceError`] when the id is blank or the
    /// lookup fails.
    pub async fn get_route(&self, route_id: &str) -> RouteRegistryServiceResult<Option<Route>> {
        let id = RouteId::new(route_id)?;
        Ok(self.repository.find(&id).await?)
    }

    /// Returns the number of registered routes.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRegistryServiceError::Repository`] when the count fails.
    pub async fn count(&self) -> RouteRegistryServiceResult<usize> {
        Ok(self.repository.count().await?)
    }
}
