//! Domain model for routes and their secondary indexes.

mod error;
mod filter;
mod index;
mod route;

pub use error::RouteDomainError;
pub use filter::RouteFilter;
pub use index::RouteIndexes;
pub use route::{Route, RouteId, RouteMetadata};
