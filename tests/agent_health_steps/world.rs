//! Shared world state for agent health BDD scenarios.

use std::sync::Arc;

use curator::{config::CuratorConfig, curator::Curator};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for agent health behaviour tests.
pub struct HealthWorld {
    pub curator: Curator<DefaultClock>,
    pub last_error_code: Option<String>,
}

impl HealthWorld {
    /// Creates a world around a curator with monitors disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            curator: Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock)),
            last_error_code: None,
        }
    }
}

impl Default for HealthWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> HealthWorld {
    HealthWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
