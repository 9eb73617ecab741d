//! In-memory capability adapters.

mod discovery_backend;
mod repository;

pub use discovery_backend::InMemoryDiscoveryBackend;
pub use repository::InMemoryCapabilityRepository;
