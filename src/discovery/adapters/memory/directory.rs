//! In-memory service directory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::discovery::{
    domain::DiscoveredService,
    ports::{ServiceDirectory, ServiceDirectoryError, ServiceDirectoryResult},
};

/// Thread-safe in-memory service directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceDirectory {
    services: Arc<RwLock<BTreeMap<String, DiscoveredService>>>,
}

impl InMemoryServiceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ServiceDirectoryError {
    ServiceDirectoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ServiceDirectory for InMemoryServiceDirectory {
    async fn lookup(&self, name: &str) -> ServiceDirectoryResult<Option<DiscoveredService>> {
        let services = self.services.read().map_err(poisoned)?;
        Ok(services.get(name).cloned())
    }

    async fn register(&self, service: DiscoveredService) -> ServiceDirectoryResult<()> {
        let mut services = self.services.write().map_err(poisoned)?;
        services.insert(service.name.clone(), service);
        Ok(())
    }
}
