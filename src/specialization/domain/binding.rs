//! Agent-to-specialization bindings.

use super::{
    ExpertiseLevel, GENERAL_PILLAR, SpecializationDomainError, SpecializationStatus,
    SpecializationUsage,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_pillar() -> String {
    GENERAL_PILLAR.to_owned()
}

fn default_version() -> String {
    "1.0.0".to_owned()
}

/// Specialization configuration supplied when binding an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationRequest {
    /// Specialization identifier.
    pub id: String,
    /// Display name; defaults to the identifier.
    #[serde(default)]
    pub name: Option<String>,
    /// Owning pillar.
    #[serde(default = "default_pillar")]
    pub pillar: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Capabilities the agent brings to the specialization.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Prompt template used when the agent acts in this role.
    #[serde(default)]
    pub system_prompt_template: String,
    /// Expertise level.
    #[serde(default)]
    pub expertise_level: ExpertiseLevel,
    /// Binding version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: SpecializationStatus,
}

impl SpecializationRequest {
    /// Creates an active, intermediate request in the `general` pillar.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            pillar: default_pillar(),
            description: String::new(),
            capabilities: Vec::new(),
            system_prompt_template: String::new(),
            expertise_level: ExpertiseLevel::default(),
            version: default_version(),
            status: SpecializationStatus::default(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the pillar.
    #[must_use]
    pub fn with_pillar(mut self, pillar: impl Into<String>) -> Self {
        self.pillar = pillar.into();
        self
    }

    /// Adds a capability.
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Sets the system prompt template.
    #[must_use]
    pub fn with_system_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.system_prompt_template = template.into();
        self
    }

    /// Sets the expertise level.
    #[must_use]
    pub const fn with_expertise_level(mut self, level: ExpertiseLevel) -> Self {
        self.expertise_level = level;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: SpecializationStatus) -> Self {
        self.status = status;
        self
    }
}

/// An agent bound to a specialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpecialization {
    /// Agent identifier.
    pub agent_id: String,
    /// Agent display name.
    pub agent_name: String,
    /// Specialization identifier.
    pub specialization_id: String,
    /// Specialization display name.
    pub specialization_name: String,
    /// Owning pillar.
    pub pillar: String,
    /// Human-readable description.
    pub description: String,
    /// Capabilities the agent brings.
    pub capabilities: Vec<String>,
    /// Prompt template.
    pub system_prompt_template: String,
    /// Expertise level.
    pub expertise_level: ExpertiseLevel,
    /// Binding version.
    pub version: String,
    /// Lifecycle status.
    pub status: SpecializationStatus,
    /// When the binding was made.
    pub registered_at: DateTime<Utc>,
    /// When usage last changed.
    pub last_updated: DateTime<Utc>,
    /// Number of recorded uses.
    pub usage_count: u64,
    /// Successful share of recorded uses.
    pub success_rate: f64,
}

impl AgentSpecialization {
    /// Binds an agent according to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecializationDomainError`] when the agent or specialization
    /// identifier is blank.
    pub fn bind(
        agent_id: &str,
        agent_name: &str,
        request: SpecializationRequest,
        bound_at: DateTime<Utc>,
    ) -> Result<Self, SpecializationDomainError> {
        let agent = agent_id.trim();
        if agent.is_empty() {
            return Err(SpecializationDomainError::EmptyAgentId);
        }
        let specialization_id = request.id.trim().to_owned();
        if specialization_id.is_empty() {
            return Err(SpecializationDomainError::EmptySpecializationId);
        }
        let SpecializationRequest {
            name,
            pillar,
            description,
            capabilities,
            system_prompt_template,
            expertise_level,
            version,
            status,
            ..
        } = request;
        Ok(Self {
            agent_id: agent.to_owned(),
            agent_name: agent_name.to_owned(),
            specialization_name: name.unwrap_or_else(|| specialization_id.clone()),
            specialization_id,
            pillar,
            description,
            capabilities,
            system_prompt_template,
            expertise_level,
            version,
            status,
            registered_at: bound_at,
            last_updated: bound_at,
            usage_count: 0,
            success_rate: 0.0,
        })
    }

    /// Refreshes the counters from `usage`.
    pub fn sync_usage(&mut self, usage: &SpecializationUsage, updated_at: DateTime<Utc>) {
        self.usage_count = usage.total_uses;
        self.success_rate = usage.success_rate();
        self.last_updated = updated_at;
    }
}
