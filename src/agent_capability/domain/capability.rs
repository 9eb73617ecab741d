//! Agent capability records and registration input.

use super::{CapabilityStatus, DEFAULT_CAPABILITY_TYPE, GENERAL_SPECIALIZATION, UNKNOWN_PILLAR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_capability_type() -> String {
    DEFAULT_CAPABILITY_TYPE.to_owned()
}

fn default_version() -> String {
    "1.0.0".to_owned()
}

/// Capability as declared by an agent at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCapabilitySpec {
    /// Capability name, unique within one agent.
    pub name: String,
    /// Free-form kind such as `tool` or `analysis`.
    #[serde(rename = "type", default = "default_capability_type")]
    pub capability_type: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Parameter schema.
    #[serde(default)]
    pub parameters: Option<Value>,
    /// Names of capabilities this one relies on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Capability version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: CapabilityStatus,
}

impl AgentCapabilitySpec {
    /// Creates an active `tool` capability at version `1.0.0`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capability_type: default_capability_type(),
            description: String::new(),
            parameters: None,
            dependencies: Vec::new(),
            version: default_version(),
            status: CapabilityStatus::Active,
        }
    }

    /// Sets the capability type.
    #[must_use]
    pub fn with_type(mut self, capability_type: impl Into<String>) -> Self {
        self.capability_type = capability_type.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the parameter schema.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Adds a dependency.
    #[must_use]
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: CapabilityStatus) -> Self {
        self.status = status;
        self
    }
}

/// Pillar and specialization an agent's capabilities serve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityPlacement {
    /// Owning pillar.
    pub pillar: Option<String>,
    /// Owning specialization.
    pub specialization: Option<String>,
}

/// Registered capability of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCapability {
    /// Owning agent.
    pub agent_id: String,
    /// Owning agent's display name.
    pub agent_name: String,
    /// Capability name.
    pub capability_name: String,
    /// Free-form kind.
    #[serde(rename = "type")]
    pub capability_type: String,
    /// Human-readable description.
    pub description: String,
    /// Parameter schema.
    pub parameters: Option<Value>,
    /// Capability dependencies.
    pub dependencies: Vec<String>,
    /// Capability version.
    pub version: String,
    /// Lifecycle status.
    pub status: CapabilityStatus,
    /// Owning pillar.
    pub pillar: Option<String>,
    /// Owning specialization.
    pub specialization: Option<String>,
    /// Registration time.
    pub registered_at: DateTime<Utc>,
    /// Number of recorded uses.
    pub usage_count: u64,
    /// Time of the most recent use.
    pub last_used: Option<DateTime<Utc>>,
}

impl AgentCapability {
    /// Materialises `spec` for an agent.
    #[must_use]
    pub fn from_spec(
        agent_id: &str,
        agent_name: &str,
        spec: AgentCapabilitySpec,
        placement: &CapabilityPlacement,
        registered_at: DateTime<Utc>,
    ) -> Self {
        let AgentCapabilitySpec {
            name,
            capability_type,
            description,
            parameters,
            dependencies,
            version,
            status,
        } = spec;
        Self {
            agent_id: agent_id.to_owned(),
            agent_name: agent_name.to_owned(),
            capability_name: name.trim().to_owned(),
            capability_type,
            description,
            parameters,
            dependencies,
            version,
            status,
            pillar: placement.pillar.clone(),
            specialization: placement.specialization.clone(),
            registered_at,
            usage_count: 0,
            last_used: None,
        }
    }

    /// Counts one use at `used_at`.
    pub const fn record_use(&mut self, used_at: DateTime<Utc>) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used = Some(used_at);
    }

    /// Returns the pillar bucket.
    #[must_use]
    pub fn pillar_or_unknown(&self) -> &str {
        self.pillar.as_deref().unwrap_or(UNKNOWN_PILLAR)
    }

    /// Returns the specialization bucket.
    #[must_use]
    pub fn specialization_or_general(&self) -> &str {
        self.specialization
            .as_deref()
            .unwrap_or(GENERAL_SPECIALIZATION)
    }
}
