//! Catalog entries describing available specializations.

use super::GENERAL_PILLAR;
use serde::{Deserialize, Serialize};

fn default_pillar() -> String {
    GENERAL_PILLAR.to_owned()
}

/// A specialization as published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSpecialization {
    /// Specialization identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning pillar.
    #[serde(default = "default_pillar")]
    pub pillar: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Capabilities the specialization expects.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl CatalogSpecialization {
    /// Creates an entry in the `general` pillar.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pillar: default_pillar(),
            description: String::new(),
            capabilities: Vec::new(),
        }
    }

    /// Sets the pillar.
    #[must_use]
    pub fn with_pillar(mut self, pillar: impl Into<String>) -> Self {
        self.pillar = pillar.into();
        self
    }

    /// Adds an expected capability.
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }
}
