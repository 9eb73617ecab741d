//! Capability key derived from service and capability names.

use super::CapabilityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry key of a capability, `service_name.capability_name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityKey(String);

impl CapabilityKey {
    /// Derives the key for a capability of a service.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityDomainError`] when either name is blank or the
    /// service name contains `.`, which would make keys ambiguous.
    pub fn from_parts(
        service_name: &str,
        capability_name: &str,
    ) -> Result<Self, CapabilityDomainError> {
        let service = service_name.trim();
        let capability = capability_name.trim();
        if service.is_empty() {
            return Err(CapabilityDomainError::EmptyServiceName);
        }
        if service.contains('.') {
            return Err(CapabilityDomainError::DottedServiceName(service.to_owned()));
        }
        if capability.is_empty() {
            return Err(CapabilityDomainError::EmptyCapabilityName);
        }
        Ok(Self(format!("{service}.{capability}")))
    }

    /// Parses a key supplied by a caller.
    ///
    /// Any non-blank key is accepted; keys that were never registered are
    /// reported as absent by lookups rather than rejected here.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityDomainError::MalformedKey`] when the input is blank.
    pub fn parse(raw: &str) -> Result<Self, CapabilityDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CapabilityDomainError::MalformedKey(raw.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CapabilityKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
