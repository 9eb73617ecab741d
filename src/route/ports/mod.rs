//! Port contracts for route persistence and discovery.

pub mod repository;

pub use repository::{RouteRepository, RouteRepositoryError, RouteRepositoryResult};
