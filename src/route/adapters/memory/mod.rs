//! In-memory route adapters.

mod repository;

pub use repository::InMemoryRouteRepository;
