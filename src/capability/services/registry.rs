//! Service layer for capability registration and lookup.

use crate::capability::{
    domain::{
        CapabilityDefinition, CapabilityDomainError, CapabilityKey, Contract, ContractKind,
        DEFAULT_CAPABILITY_VERSION, DEFAULT_REALM, DefinitionParts,
    },
    ports::{
        CapabilityRepository, CapabilityRepositoryError, DiscoveryBackend, ServiceRegistration,
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a capability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterCapabilityRequest {
    service_name: String,
    capability_name: String,
    #[serde(default)]
    protocol_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    realm: Option<String>,
    #[serde(default)]
    contracts: BTreeMap<ContractKind, Contract>,
    #[serde(default)]
    semantic_mapping: Option<Value>,
    #[serde(default)]
    version: Option<String>,
}

impl RegisterCapabilityRequest {
    /// Creates a request for a capability of a service.
    #[must_use]
    pub fn new(service_name: impl Into<String>, capability_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            capability_name: capability_name.into(),
            protocol_name: None,
            description: None,
            realm: None,
            contracts: BTreeMap::new(),
            semantic_mapping: None,
            version: None,
        }
    }

    /// Sets the protocol name; defaults to `<service_name>Protocol`.
    #[must_use]
    pub fn with_protocol(mut self, protocol_name: impl Into<String>) -> Self {
        self.protocol_name = Some(protocol_name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the realm; defaults to `unknown`.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Adds or replaces the contract of one kind.
    #[must_use]
    pub fn with_contract(mut self, kind: ContractKind, contract: Contract) -> Self {
        self.contracts.insert(kind, contract);
        self
    }

    /// Sets the semantic mapping.
    #[must_use]
    pub fn with_semantic_mapping(mut self, mapping: Value) -> Self {
        self.semantic_mapping = Some(mapping);
        self
    }

    /// Sets the version; defaults to `1.0.0`.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    fn into_parts(self) -> Result<DefinitionParts, CapabilityDomainError> {
        let capability_key = CapabilityKey::from_parts(&self.service_name, &self.capability_name)?;
        let service_name = self.service_name.trim().to_owned();
        let capability_name = self.capability_name.trim().to_owned();
        let protocol_name = non_blank(self.protocol_name)
            .unwrap_or_else(|| format!("{service_name}Protocol"));
        let description = non_blank(self.description)
            .unwrap_or_else(|| format!("{capability_name} capability of {service_name}"));
        Ok(DefinitionParts {
            capability_key,
            capability_name,
            service_name,
            protocol_name,
            description,
            realm: non_blank(self.realm).unwrap_or_else(|| DEFAULT_REALM.to_owned()),
            contracts: self.contracts,
            semantic_mapping: self.semantic_mapping,
            version: non_blank(self.version)
                .unwrap_or_else(|| DEFAULT_CAPABILITY_VERSION.to_owned()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityRegistration {
    /// The stored definition.
    pub definition: CapabilityDefinition,
    /// Whether an earlier definition under the same key was replaced.
    pub replaced: bool,
    /// Backend publication result; `None` when no backend is configured.
    pub backend_synced: Option<bool>,
}

/// Outcome of an unregistration.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityRemoval {
    /// The definition was removed.
    Removed {
        /// The removed definition.
        definition: CapabilityDefinition,
        /// Backend withdrawal result; `None` when no backend is configured.
        backend_synced: Option<bool>,
    },
    /// Nothing was registered under the key.
    NotFound(CapabilityKey),
}

/// Service-level errors for capability registry operations.
#[derive(Debug, Error)]
pub enum CapabilityRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CapabilityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CapabilityRepositoryError),
}

/// Result type for capability registry service operations.
pub type CapabilityRegistryServiceResult<T> = Result<T, CapabilityRegistryServiceError>;

/// Capability registration and lookup service.
#[derive(Clone)]
pub struct CapabilityRegistryService<R, C>
where
    R: CapabilityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    backend: Option<Arc<dyn DiscoveryBackend>>,
    backend_timeout: Duration,
    clock: Arc<C>,
}

impl<R, C> CapabilityRegistryService<R, C>
where
    R: CapabilityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a registry service with no discovery backend.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            backend: None,
            backend_timeout: Duration::from_secs(2),
            clock,
        }
    }

    /// Mirrors registrations into `backend`, bounding each call by `timeout`.
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn DiscoveryBackend>, timeout: Duration) -> Self {
        self.backend = Some(backend);
        self.backend_timeout = timeout;
        self
    }

    /// Registers a capability, replacing any definition under the same key.
    ///
    /// Backend publication happens after the local write and never fails the
    /// registration; its result is reported in
    /// [`CapabilityRegistration::backend_synced`].
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityRegistryServiceError`] when a name is blank or the
    /// repository rejects the write.
    pub async fn register(
        &self,
        request: RegisterCapabilityRequest,
    ) -> CapabilityRegistryServiceResult<CapabilityRegistration> {
        let parts = request.into_parts()?;
        let definition = CapabilityDefinition::from_parts(parts, self.clock.utc());
        let previous = self.repository.upsert(&definition).await?;
        info!(
            capability_key = %definition.key(),
            realm = definition.realm(),
            replaced = previous.is_some(),
            "capability registered"
        );

        let backend_synced = self.publish(&definition).await;
        Ok(CapabilityRegistration {
            definition,
            replaced: previous.is_some(),
            backend_synced,
        })
    }

    /// Finds a capability by key.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityRegistryServiceError`] when the key is blank or the
    /// lookup fails.
    pub async fn get(
        &self,
        key: &str,
    ) -> CapabilityRegistryServiceResult<Option<CapabilityDefinition>> {
        let capability_key = CapabilityKey::parse(key)?;
        Ok(self.repository.find(&capability_key).await?)
    }

    /// Lists capabilities ordered by key, optionally restricted to a realm.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityRegistryServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list(
        &self,
        realm: Option<&str>,
    ) -> CapabilityRegistryServiceResult<Vec<CapabilityDefinition>> {
        let all = self.repository.list_all().await?;
        Ok(match realm {
            Some(wanted) => all
                .into_iter()
                .filter(|definition| definition.realm() == wanted)
                .collect(),
            None => all,
        })
    }

    /// Lists the capabilities of one service, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityRegistryServiceError::Repository`] when the lookup
    /// fails.
    pub async fn get_by_service(
        &self,
        service_name: &str,
    ) -> CapabilityRegistryServiceResult<Vec<CapabilityDefinition>> {
        let wanted = service_name.trim();
        let all = self.repository.list_all().await?;
        Ok(all
            .into_iter()
            .filter(|definition| definition.service_name() == wanted)
            .collect())
    }

    /// Removes a capability.
    ///
    /// An absent key yields [`CapabilityRemoval::NotFound`] rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityRegistryServiceError`] when the key is blank or the
    /// repository fails.
    pub async fn unregister(
        &self,
        key: &str,
    ) -> CapabilityRegistryServiceResult<CapabilityRemoval> {
        let capability_key = CapabilityKey::parse(key)?;
        let Some(definition) = self.repository.remove(&capability_key).await? else {
            return Ok(CapabilityRemoval::NotFound(capability_key));
        };
        info!(capability_key = %capability_key, "capability unregistered");
        let backend_synced = self.withdraw(&capability_key).await;
        Ok(CapabilityRemoval::Removed {
            definition,
            backend_synced,
        })
    }

    /// Returns the number of registered capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityRegistryServiceError::Repository`] when the count
    /// fails.
    pub async fn count(&self) -> CapabilityRegistryServiceResult<usize> {
        Ok(self.repository.count().await?)
    }

    async fn publish(&self, definition: &CapabilityDefinition) -> Option<bool> {
        let backend = self.backend.as_ref()?;
        let registration = ServiceRegistration::for_capability(definition);
        let outcome =
            tokio::time::timeout(self.backend_timeout, backend.register_service(&registration))
                .await;
        Some(self.log_backend_outcome(definition.key(), "register", outcome))
    }

    async fn withdraw(&self, key: &CapabilityKey) -> Option<bool> {
        let backend = self.backend.as_ref()?;
        let outcome =
            tokio::time::timeout(self.backend_timeout, backend.deregister_service(key.as_str()))
                .await;
        Some(self.log_backend_outcome(key, "deregister", outcome))
    }

    fn log_backend_outcome<E: std::fmt::Display>(
        &self,
        key: &CapabilityKey,
        operation: &'static str,
        outcome: Result<Result<(), E>, tokio::time::error::Elapsed>,
    ) -> bool {
        match outcome {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                warn!(
                    capability_key = %key,
                    operation,
                    error = %err,
                    "discovery backend call failed"
                );
                false
            }
            Err(_) => {
                warn!(
                    capability_key = %key,
                    operation,
                    timeout_ms =
                        u64::try_from(self.backend_timeout.as_millis()).unwrap_or(u64::MAX),
                    "discovery backend call timed out"
                );
                false
            }
        }
    }
}
