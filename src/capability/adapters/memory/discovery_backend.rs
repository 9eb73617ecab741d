//! In-memory discovery backend with outage simulation.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::capability::ports::{DiscoveryBackend, DiscoveryBackendError, ServiceRegistration};

/// Discovery backend that keeps published entries in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDiscoveryBackend {
    services: Arc<RwLock<BTreeMap<String, ServiceRegistration>>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryDiscoveryBackend {
    fn default() -> Self {
        Self {
            services: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryDiscoveryBackend {
    /// Creates an empty, reachable backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles reachability; an unreachable backend fails every call.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns the published entry for `service_id`.
    #[must_use]
    pub fn service(&self, service_id: &str) -> Option<ServiceRegistration> {
        self.services
            .read()
            .ok()
            .and_then(|services| services.get(service_id).cloned())
    }

    /// Returns the identifiers of every published entry.
    #[must_use]
    pub fn service_ids(&self) -> Vec<String> {
        self.services
            .read()
            .map(|services| services.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn ensure_available(&self) -> Result<(), DiscoveryBackendError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DiscoveryBackendError::Unavailable(
                "in-memory backend marked unavailable".to_owned(),
            ))
        }
    }
}

#[async_trait]
impl DiscoveryBackend for InMemoryDiscoveryBackend {
    async fn register_service(
        &self,
        registration: &ServiceRegistration,
    ) -> Result<(), DiscoveryBackendError> {
        self.ensure_available()?;
        let mut services = self
            .services
            .write()
            .map_err(|err| DiscoveryBackendError::Rejected(err.to_string()))?;
        services.insert(registration.service_id.clone(), registration.clone());
        Ok(())
    }

    async fn deregister_service(&self, service_id: &str) -> Result<(), DiscoveryBackendError> {
        self.ensure_available()?;
        let mut services = self
            .services
            .write()
            .map_err(|err| DiscoveryBackendError::Rejected(err.to_string()))?;
        services.remove(service_id);
        Ok(())
    }
}
