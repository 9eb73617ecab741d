//! Individual policy reports.

use super::PolicyDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Source recorded when a snapshot names none.
pub const UNKNOWN_SOURCE: &str = "unknown_domain";

/// Policies as submitted by a reporting domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    /// Reporting domain.
    #[serde(default)]
    pub source: Option<String>,
    /// Policy values by key; must be a JSON object.
    pub policies: Value,
}

impl PolicySnapshot {
    /// Creates a snapshot with no named source.
    #[must_use]
    pub const fn new(policies: Value) -> Self {
        Self {
            source: None,
            policies,
        }
    }

    /// Names the reporting domain.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One stored, immutable policy report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    report_id: Uuid,
    service_name: String,
    source: String,
    reported_at: DateTime<Utc>,
    policies: Map<String, Value>,
}

impl PolicyReport {
    /// Validates a snapshot and stamps it.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyDomainError`] when the service name is blank or the
    /// policies are not a JSON object.
    pub fn new(
        service_name: &str,
        snapshot: PolicySnapshot,
        reported_at: DateTime<Utc>,
    ) -> Result<Self, PolicyDomainError> {
        let service = service_name.trim();
        if service.is_empty() {
            return Err(PolicyDomainError::EmptyServiceName);
        }
        let kind = json_kind(&snapshot.policies);
        let Value::Object(policies) = snapshot.policies else {
            return Err(PolicyDomainError::PoliciesNotAnObject(kind));
        };
        let source = snapshot
            .source
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_owned());
        Ok(Self {
            report_id: Uuid::new_v4(),
            service_name: service.to_owned(),
            source,
            reported_at,
            policies,
        })
    }

    /// Returns the report identifier.
    #[must_use]
    pub const fn report_id(&self) -> Uuid {
        self.report_id
    }

    /// Returns the service the report concerns.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the reporting domain.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns when the report arrived.
    #[must_use]
    pub const fn reported_at(&self) -> DateTime<Utc> {
        self.reported_at
    }

    /// Returns the reported policies.
    #[must_use]
    pub const fn policies(&self) -> &Map<String, Value> {
        &self.policies
    }
}
