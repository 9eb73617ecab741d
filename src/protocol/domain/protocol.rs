//! Service protocol aggregate.

use super::ProtocolDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Schemas describing one protocol method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodContract {
    /// JSON schema of the request.
    #[serde(default)]
    pub input_schema: Value,
    /// JSON schema of the response.
    #[serde(default)]
    pub output_schema: Value,
    /// Optional mapping onto the platform vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_mapping: Option<Value>,
}

impl MethodContract {
    /// Creates a method contract from its schemas.
    #[must_use]
    pub const fn new(input_schema: Value, output_schema: Value) -> Self {
        Self {
            input_schema,
            output_schema,
            semantic_mapping: None,
        }
    }

    /// Attaches a semantic mapping.
    #[must_use]
    pub fn with_semantic_mapping(mut self, mapping: Value) -> Self {
        self.semantic_mapping = Some(mapping);
        self
    }
}

/// Registry key of a protocol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProtocolKey {
    service_name: String,
    protocol_name: String,
}

impl ProtocolKey {
    /// Builds a key from trimmed, non-blank names.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolDomainError`] when either name is blank.
    pub fn new(service_name: &str, protocol_name: &str) -> Result<Self, ProtocolDomainError> {
        let service = service_name.trim();
        let protocol = protocol_name.trim();
        if service.is_empty() {
            return Err(ProtocolDomainError::EmptyServiceName);
        }
        if protocol.is_empty() {
            return Err(ProtocolDomainError::EmptyProtocolName);
        }
        Ok(Self {
            service_name: service.to_owned(),
            protocol_name: protocol.to_owned(),
        })
    }

    /// Returns the service name.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the protocol name.
    #[must_use]
    pub fn protocol_name(&self) -> &str {
        &self.protocol_name
    }
}

impl fmt::Display for ProtocolKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.service_name, self.protocol_name)
    }
}

/// Protocol exposed by a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProtocol {
    key: ProtocolKey,
    methods: BTreeMap<String, MethodContract>,
    registered_at: DateTime<Utc>,
}

impl ServiceProtocol {
    /// Validates method names and builds a protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolDomainError::EmptyMethodName`] when a method name is
    /// blank.
    pub fn new(
        key: ProtocolKey,
        methods: BTreeMap<String, MethodContract>,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, ProtocolDomainError> {
        let mut validated = BTreeMap::new();
        for (name, contract) in methods {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ProtocolDomainError::EmptyMethodName {
                    protocol_name: key.protocol_name().to_owned(),
                });
            }
            validated.insert(trimmed.to_owned(), contract);
        }
        Ok(Self {
            key,
            methods: validated,
            registered_at,
        })
    }

    /// Returns the registry key.
    #[must_use]
    pub const fn key(&self) -> &ProtocolKey {
        &self.key
    }

    /// Returns the declared methods by name.
    #[must_use]
    pub const fn methods(&self) -> &BTreeMap<String, MethodContract> {
        &self.methods
    }

    /// Returns one method contract.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodContract> {
        self.methods.get(name)
    }

    /// Returns when the protocol was registered.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
