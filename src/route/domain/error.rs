//! Route domain validation errors.

use thiserror::Error;

/// Validation failures for route metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteDomainError {
    /// The route identifier was blank.
    #[error("route_id must not be empty")]
    EmptyRouteId,

    /// The route path was blank.
    #[error("route path must not be empty")]
    EmptyPath,
}
