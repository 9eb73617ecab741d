//! Route aggregate and registration metadata.

use super::RouteDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique route identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    /// Validates and wraps a route identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDomainError::EmptyRouteId`] when the identifier is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, RouteDomainError> {
        let raw = id.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RouteDomainError::EmptyRouteId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Caller-supplied route description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMetadata {
    /// Unique route identifier.
    pub route_id: String,
    /// URL path.
    pub path: String,
    /// HTTP method; defaults to `GET`.
    #[serde(default)]
    pub method: Option<String>,
    /// Owning pillar.
    #[serde(default)]
    pub pillar: Option<String>,
    /// Owning realm.
    #[serde(default)]
    pub realm: Option<String>,
    /// Owning service.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Capability served by the route.
    #[serde(default)]
    pub capability_name: Option<String>,
    /// Who declared the route; defaults to `unknown`.
    #[serde(default)]
    pub defined_by: Option<String>,
}

impl RouteMetadata {
    /// Creates metadata for a route id and path.
    #[must_use]
    pub fn new(route_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the pillar.
    #[must_use]
    pub fn with_pillar(mut self, pillar: impl Into<String>) -> Self {
        self.pillar = Some(pillar.into());
        self
    }

    /// Sets the realm.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Sets the owning service.
    #[must_use]
    pub fn with_service(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Sets the capability served.
    #[must_use]
    pub fn with_capability(mut self, capability_name: impl Into<String>) -> Self {
        self.capability_name = Some(capability_name.into());
        self
    }

    /// Sets who declared the route.
    #[must_use]
    pub fn with_defined_by(mut self, defined_by: impl Into<String>) -> Self {
        self.defined_by = Some(defined_by.into());
        self
    }
}

/// A registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    route_id: RouteId,
    path: String,
    method: String,
    pillar: Option<String>,
    realm: Option<String>,
    service_name: Option<String>,
    capability_name: Option<String>,
    defined_by: String,
    registered_at: DateTime<Utc>,
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl Route {
    /// Validates metadata and stamps the registration time.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDomainError`] when the id or path is blank.
    pub fn new(
        metadata: RouteMetadata,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, RouteDomainError> {
        let route_id = RouteId::new(metadata.route_id)?;
        let path = metadata.path.trim().to_owned();
        if path.is_empty() {
            return Err(RouteDomainError::EmptyPath);
        }
        Ok(Self {
            route_id,
            path,
            method: optional(metadata.method)
                .map_or_else(|| "GET".to_owned(), |method| method.to_ascii_uppercase()),
            pillar: optional(metadata.pillar),
            realm: optional(metadata.realm),
            service_name: optional(metadata.service_name),
            capability_name: optional(metadata.capability_name),
            defined_by: optional(metadata.defined_by).unwrap_or_else(|| "unknown".to_owned()),
            registered_at,
        })
    }

    /// Returns the route identifier.
    #[must_use]
    pub const fn id(&self) -> &RouteId {
        &self.route_id
    }

    /// Returns the URL path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the upper-cased HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the pillar, if any.
    #[must_use]
    pub fn pillar(&self) -> Option<&str> {
        self.pillar.as_deref()
    }

    /// Returns the realm, if any.
    #[must_use]
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    /// Returns the owning service, if any.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// Returns the capability served, if any.
    #[must_use]
    pub fn capability_name(&self) -> Option<&str> {
        self.capability_name.as_deref()
    }

    /// Returns who declared the route.
    #[must_use]
    pub fn defined_by(&self) -> &str {
        &self.defined_by
    }

    /// Returns when the route was registered.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
