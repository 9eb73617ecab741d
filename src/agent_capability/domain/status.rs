//! Capability lifecycle status.

use super::ParseCapabilityStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an agent capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    /// In normal use.
    #[default]
    Active,
    /// Scheduled for removal.
    Deprecated,
    /// Not yet stable.
    Experimental,
}

impl CapabilityStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deprecated => "deprecated",
            Self::Experimental => "experimental",
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CapabilityStatus {
    type Error = ParseCapabilityStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "deprecated" => Ok(Self::Deprecated),
            "experimental" => Ok(Self::Experimental),
            other => Err(ParseCapabilityStatusError(other.to_owned())),
        }
    }
}
