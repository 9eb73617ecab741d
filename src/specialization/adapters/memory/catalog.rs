//! In-memory specialization catalog.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::specialization::{
    domain::CatalogSpecialization,
    ports::{SpecializationCatalog, SpecializationCatalogError, SpecializationCatalogResult},
};

/// Thread-safe catalog seeded in process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecializationCatalog {
    entries: Arc<RwLock<BTreeMap<String, CatalogSpecialization>>>,
}

impl InMemorySpecializationCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `entries`.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = CatalogSpecialization>) -> Self {
        let catalog = Self::new();
        if let Ok(mut map) = catalog.entries.write() {
            map.extend(entries.into_iter().map(|entry| (entry.id.clone(), entry)));
        }
        catalog
    }

    /// Adds or replaces an entry.
    ///
    /// # Errors
    ///
    /// Returns [`SpecializationCatalogError`] when the catalog lock is
    /// poisoned.
    pub fn insert(&self, entry: CatalogSpecialization) -> SpecializationCatalogResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(entry.id.clone(), entry);
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> SpecializationCatalogError {
    SpecializationCatalogError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SpecializationCatalog for InMemorySpecializationCatalog {
    async fn get(&self, id: &str) -> SpecializationCatalogResult<Option<CatalogSpecialization>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(id).cloned())
    }

    async fn list_all(&self) -> SpecializationCatalogResult<Vec<CatalogSpecialization>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.values().cloned().collect())
    }
}
