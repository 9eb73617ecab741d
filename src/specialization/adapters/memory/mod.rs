//! In-memory specialization adapters.

mod catalog;

pub use catalog::InMemorySpecializationCatalog;
