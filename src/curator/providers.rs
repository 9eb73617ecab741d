//! Discovery lookup tier backed by the capability registry.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::warn;

use crate::capability::{
    adapters::memory::InMemoryCapabilityRepository, services::CapabilityRegistryService,
};
use crate::discovery::{domain::DiscoveredService, services::ServiceProvider};

/// Answers lookups for services that registered capabilities.
pub struct CapabilityServiceProvider<C>
where
    C: Clock + Send + Sync,
{
    registry: Arc<CapabilityRegistryService<InMemoryCapabilityRepository, C>>,
}

impl<C> CapabilityServiceProvider<C>
where
    C: Clock + Send + Sync,
{
    /// Wraps a capability registry.
    #[must_use]
    pub const fn new(
        registry: Arc<CapabilityRegistryService<InMemoryCapabilityRepository, C>>,
    ) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl<C> ServiceProvider for CapabilityServiceProvider<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn tier(&self) -> &'static str {
        "capability_registry"
    }

    async fn provide(&self, name: &str) -> Option<DiscoveredService> {
        let definitions = match self.registry.get_by_service(name).await {
            Ok(found) => found,
            Err(err) => {
                warn!(service = name, error = %err, "capability lookup failed");
                return None;
            }
        };
        definitions.first().map(|definition| DiscoveredService {
            name: definition.service_name().to_owned(),
            location: "capability_registry".to_owned(),
            kind: definition.protocol_name().to_owned(),
            realm: definition.realm().to_owned(),
        })
    }
}
