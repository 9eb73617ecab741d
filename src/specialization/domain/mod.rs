//! Domain model for agent specializations.

mod analytics;
mod binding;
mod catalog;
mod error;
mod health;
mod level;
mod usage;

pub use analytics::SpecializationAnalytics;
pub use binding::{AgentSpecialization, SpecializationRequest};
pub use catalog::CatalogSpecialization;
pub use error::{ParseExpertiseLevelError, SpecializationDomainError};
pub use health::{SpecializationHealthReport, SpecializationHealthSummary, TopSpecialization};
pub use level::{ExpertiseLevel, SpecializationStatus};
pub use usage::SpecializationUsage;

/// Pillar assumed when neither the request nor the catalog names one.
pub const GENERAL_PILLAR: &str = "general";
