//! Expertise levels and specialization lifecycle status.

use super::ParseExpertiseLevelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Depth of an agent's expertise in its specialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpertiseLevel {
    /// Entry level.
    Beginner,
    /// Working knowledge.
    #[default]
    Intermediate,
    /// Deep knowledge.
    Advanced,
    /// Authority.
    Expert,
}

impl ExpertiseLevel {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ExpertiseLevel {
    type Error = ParseExpertiseLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(ParseExpertiseLevelError(other.to_owned())),
        }
    }
}

/// Lifecycle status of an agent's specialization binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecializationStatus {
    /// In normal use.
    #[default]
    Active,
    /// Scheduled for removal.
    Deprecated,
    /// Not yet stable.
    Experimental,
}

impl SpecializationStatus {
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

impl fmt::Display for SpecializationStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
