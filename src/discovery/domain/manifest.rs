//! Explicit service registration manifest.

use super::{DiscoveredService, DiscoveryDomainError};
use serde::{Deserialize, Serialize};

fn default_realm() -> String {
    "unknown".to_owned()
}

fn default_location() -> String {
    "manifest".to_owned()
}

/// One declared service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Service name.
    pub name: String,
    /// Base the service implements.
    pub kind: String,
    /// Realm the service belongs to.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// Where the service is declared.
    #[serde(default = "default_location")]
    pub location: String,
}

impl ServiceDescriptor {
    /// Creates a descriptor declared in the manifest.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            realm: realm.into(),
            location: default_location(),
        }
    }

    /// Converts the descriptor into a discovery record.
    #[must_use]
    pub fn to_discovered(&self) -> DiscoveredService {
        DiscoveredService {
            name: self.name.trim().to_owned(),
            location: self.location.clone(),
            kind: self.kind.clone(),
            realm: self.realm.clone(),
        }
    }
}

/// Services declared at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceManifest {
    /// Declared services, in declaration order.
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl ServiceManifest {
    /// Creates a manifest from descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::EmptyServiceName`] when a descriptor
    /// name is blank.
    pub fn new(
        services: impl IntoIterator<Item = ServiceDescriptor>,
    ) -> Result<Self, DiscoveryDomainError> {
        let manifest = Self {
            services: services.into_iter().collect(),
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parses a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError`] when the document is malformed or a
    /// descriptor name is blank.
    pub fn from_json_str(document: &str) -> Result<Self, DiscoveryDomainError> {
        let manifest: Self = serde_json::from_str(document)
            .map_err(|err| DiscoveryDomainError::InvalidManifest(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), DiscoveryDomainError> {
        if self
            .services
            .iter()
            .any(|descriptor| descriptor.name.trim().is_empty())
        {
            return Err(DiscoveryDomainError::EmptyServiceName);
        }
        Ok(())
    }

    /// Finds a descriptor by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services
            .iter()
            .find(|descriptor| descriptor.name.trim() == name)
    }
}
