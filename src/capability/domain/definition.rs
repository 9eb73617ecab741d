//! Capability definition aggregate.

use super::{CapabilityKey, Contract, ContractKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A capability published by a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDefinition {
    capability_key: CapabilityKey,
    capability_name: String,
    service_name: String,
    protocol_name: String,
    description: String,
    realm: String,
    contracts: BTreeMap<ContractKind, Contract>,
    semantic_mapping: Option<Value>,
    version: String,
    registered_at: DateTime<Utc>,
}

/// Validated fields of a definition, assembled by the registry service.
#[derive(Debug, Clone)]
pub(crate) struct DefinitionParts {
    pub(crate) capability_key: CapabilityKey,
    pub(crate) capability_name: String,
    pub(crate) service_name: String,
    pub(crate) protocol_name: String,
    pub(crate) description: String,
    pub(crate) realm: String,
    pub(crate) contracts: BTreeMap<ContractKind, Contract>,
    pub(crate) semantic_mapping: Option<Value>,
    pub(crate) version: String,
}

impl CapabilityDefinition {
    pub(crate) fn from_parts(parts: DefinitionParts, registered_at: DateTime<Utc>) -> Self {
        let DefinitionParts {
            capability_key,
            capability_name,
            service_name,
            protocol_name,
            description,
            realm,
            contracts,
            semantic_mapping,
            version,
        } = parts;
        Self {
            capability_key,
            capability_name,
            service_name,
            protocol_name,
            description,
            realm,
            contracts,
            semantic_mapping,
            version,
            registered_at,
        }
    }

    /// Returns the registry key.
    #[must_use]
    pub const fn key(&self) -> &CapabilityKey {
        &self.capability_key
    }

    /// Returns the capability name.
    #[must_use]
    pub fn capability_name(&self) -> &str {
        &self.capability_name
    }

    /// Returns the owning service name.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the protocol the capability is served over.
    #[must_use]
    pub fn protocol_name(&self) -> &str {
        &self.protocol_name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the realm.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Returns the invocation contracts by kind.
    #[must_use]
    pub const fn contracts(&self) -> &BTreeMap<ContractKind, Contract> {
        &self.contracts
    }

    /// Returns the semantic mapping, if any.
    #[must_use]
    pub const fn semantic_mapping(&self) -> Option<&Value> {
        self.semantic_mapping.as_ref()
    }

    /// Returns the version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns when this definition was registered.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Collects the endpoints declared by API contracts and tool names
    /// declared by MCP contracts, in contract-kind order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<String> {
        self.contracts
            .iter()
            .filter_map(|(kind, contract)| match kind {
                ContractKind::RestApi | ContractKind::SoaApi => contract.endpoint.clone(),
                ContractKind::McpTool => contract.tool_name.clone(),
            })
            .collect()
    }
}
