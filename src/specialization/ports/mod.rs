//! Port contracts for specialization data.

pub mod catalog;

pub use catalog::{SpecializationCatalog, SpecializationCatalogError, SpecializationCatalogResult};

#[cfg(test)]
pub use catalog::MockSpecializationCatalog;
