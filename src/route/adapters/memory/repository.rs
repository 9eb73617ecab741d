//! In-memory route repository with secondary indexes.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::route::{
    domain::{Route, RouteFilter, RouteId, RouteIndexes},
    ports::{RouteRepository, RouteRepositoryError, RouteRepositoryResult},
};

/// Thread-safe in-memory route repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRouteRepository {
    state: Arc<RwLock<RouteState>>,
}

#[derive(Debug, Default)]
struct RouteState {
    routes: BTreeMap<RouteId, Route>,
    indexes: RouteIndexes,
}

impl InMemoryRouteRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> RouteRepositoryError {
    RouteRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RouteRepository for InMemoryRouteRepository {
    async fn upsert(&self, route: &Route) -> RouteRepositoryResult<Option<Route>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let previous = state.routes.insert(route.id().clone(), route.clone());
        state.indexes.replace(previous.as_ref(), route);
        Ok(previous)
    }

    async fn find(&self, route_id: &RouteId) -> RouteRepositoryResult<Option<Route>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.routes.get(route_id).cloned())
    }

    async fn discover(&self, filter: &RouteFilter) -> RouteRepositoryResult<Vec<Route>> {
        let state = self.state.read().map_err(poisoned)?;
        let routes = match state.indexes.matching(filter) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| state.routes.get(id).cloned())
                .collect(),
            None => state.routes.values().cloned().collect(),
        };
        Ok(routes)
    }

    async fn count(&self) -> RouteRepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.routes.len())
    }
}
