//! Orchestration services for the route registry.

mod registry;

pub use registry::{RouteRegistryService, RouteRegistryServiceError, RouteRegistryServiceResult};
