//! Domain model for agent capabilities.

mod analytics;
mod capability;
mod error;
mod health;
mod status;
mod usage;

pub use analytics::{AgentCapabilityReport, CapabilityAnalytics, CapabilityHealthSummary};
pub use capability::{AgentCapability, AgentCapabilitySpec, CapabilityPlacement};
pub use error::{AgentCapabilityDomainError, ParseCapabilityStatusError};
pub use health::CapabilityHealthCheck;
pub use status::CapabilityStatus;
pub use usage::CapabilityUsage;

/// Bucket for capabilities registered without a pillar.
pub const UNKNOWN_PILLAR: &str = "unknown";

/// Bucket for capabilities registered without a specialization.
pub const GENERAL_SPECIALIZATION: &str = "general";

/// Capability type assumed when a spec names none.
pub const DEFAULT_CAPABILITY_TYPE: &str = "tool";
