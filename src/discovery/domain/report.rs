//! Discovery results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A service found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredService {
    /// Service name.
    pub name: String,
    /// Where the service was declared.
    pub location: String,
    /// Base the service implements.
    pub kind: String,
    /// Realm the service belongs to.
    pub realm: String,
}

/// A location discovery could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFailure {
    /// Directory or file that failed.
    pub location: String,
    /// Why it failed.
    pub reason: String,
}

impl DiscoveryFailure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(location: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Output of one source scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Services found, in discovery order.
    pub found: Vec<DiscoveredService>,
    /// Locations that could not be read.
    pub failed: Vec<DiscoveryFailure>,
}

/// Outcome of a full discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// Services discovered, by name.
    pub discovered: BTreeMap<String, DiscoveredService>,
    /// Services already held by the service directory.
    pub skipped: Vec<String>,
    /// Locations that could not be read.
    pub failed: Vec<DiscoveryFailure>,
}

/// A discovered service the directory did not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFailure {
    /// Service name.
    pub service: String,
    /// Why registration failed.
    pub reason: String,
}

/// Outcome of registering discovered services with the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReport {
    /// Services now held by the directory, by name.
    pub registered: Vec<String>,
    /// Services the directory rejected.
    pub failed: Vec<RegistrationFailure>,
}
