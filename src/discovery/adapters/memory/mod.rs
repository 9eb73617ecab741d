//! In-memory discovery adapters.

mod directory;

pub use directory::InMemoryServiceDirectory;
