//! In-memory capability repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::capability::{
    domain::{CapabilityDefinition, CapabilityKey},
    ports::{CapabilityRepository, CapabilityRepositoryError, CapabilityRepositoryResult},
};

/// Thread-safe in-memory capability repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCapabilityRepository {
    definitions: Arc<RwLock<BTreeMap<CapabilityKey, CapabilityDefinition>>>,
}

impl InMemoryCapabilityRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> CapabilityRepositoryError {
    CapabilityRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CapabilityRepository for InMemoryCapabilityRepository {
    async fn upsert(
        &self,
        definition: &CapabilityDefinition,
    ) -> CapabilityRepositoryResult<Option<CapabilityDefinition>> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        Ok(definitions.insert(definition.key().clone(), definition.clone()))
    }

    async fn find(
        &self,
        key: &CapabilityKey,
    ) -> CapabilityRepositoryResult<Option<CapabilityDefinition>> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.get(key).cloned())
    }

    async fn list_all(&self) -> CapabilityRepositoryResult<Vec<CapabilityDefinition>> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.values().cloned().collect())
    }

    async fn remove(
        &self,
        key: &CapabilityKey,
    ) -> CapabilityRepositoryResult<Option<CapabilityDefinition>> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        Ok(definitions.remove(key))
    }

    async fn count(&self) -> CapabilityRepositoryResult<usize> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.len())
    }
}
