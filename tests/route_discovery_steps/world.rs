//! Shared world state for route discovery BDD scenarios.

use std::sync::Arc;

use curator::{config::CuratorConfig, curator::Curator, route::domain::Route};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for route discovery behaviour tests.
pub struct RouteWorld {
    pub curator: Curator<DefaultClock>,
    pub discovered: Option<Vec<Route>>,
    pub last_error_code: Option<String>,
}

impl RouteWorld {
    /// Creates a world with an empty route registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            curator: Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock)),
            discovered: None,
            last_error_code: None,
        }
    }
}

impl Default for RouteWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RouteWorld {
    RouteWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
