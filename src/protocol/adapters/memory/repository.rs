//! In-memory protocol repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::protocol::{
    domain::{ProtocolKey, ServiceProtocol},
    ports::{ProtocolRepository, ProtocolRepositoryError, ProtocolRepositoryResult},
};

/// Thread-safe in-memory protocol repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProtocolRepository {
    protocols: Arc<RwLock<BTreeMap<ProtocolKey, ServiceProtocol>>>,
}

impl InMemoryProtocolRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ProtocolRepositoryError {
    ProtocolRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProtocolRepository for InMemoryProtocolRepository {
    async fn upsert(
        &self,
        protocol: &ServiceProtocol,
    ) -> ProtocolRepositoryResult<Option<ServiceProtocol>> {
        let mut protocols = self.protocols.write().map_err(poisoned)?;
        Ok(protocols.insert(protocol.key().clone(), protocol.clone()))
    }

    async fn find(&self, key: &ProtocolKey) -> ProtocolRepositoryResult<Option<ServiceProtocol>> {
        let protocols = self.protocols.read().map_err(poisoned)?;
        Ok(protocols.get(key).cloned())
    }

    async fn list(
        &self,
        service_name: Option<&str>,
    ) -> ProtocolRepositoryResult<Vec<ServiceProtocol>> {
        let protocols = self.protocols.read().map_err(poisoned)?;
        Ok(protocols
            .values()
            .filter(|protocol| {
                service_name.is_none_or(|name| protocol.key().service_name() == name)
            })
            .cloned()
            .collect())
    }

    async fn count(&self) -> ProtocolRepositoryResult<usize> {
        let protocols = self.protocols.read().map_err(poisoned)?;
        Ok(protocols.len())
    }
}
