//! Route discovery filter.

use serde::{Deserialize, Serialize};

/// Conjunctive filter over the route indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFilter {
    /// Required pillar.
    #[serde(default)]
    pub pillar: Option<String>,
    /// Required realm.
    #[serde(default)]
    pub realm: Option<String>,
    /// Required owning service.
    #[serde(default)]
    pub service_name: Option<String>,
}

impl RouteFilter {
    /// Creates a filter matching every route.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restricts to a pillar.
    #[must_use]
    pub fn with_pillar(mut self, pillar: impl Into<String>) -> Self {
        self.pillar = Some(pillar.into());
        self
    }

    /// Restricts to a realm.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Restricts to a service.
    #[must_use]
    pub fn with_service(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Returns whether no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pillar.is_none() && self.realm.is_none() && self.service_name.is_none()
    }
}
