//! In-memory protocol adapters.

mod repository;

pub use repository::InMemoryProtocolRepository;
