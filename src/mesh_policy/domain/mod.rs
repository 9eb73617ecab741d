//! Domain model for policy reports and their aggregate.

mod aggregate;
mod error;
mod report;

pub use aggregate::{AGGREGATED_SOURCE, NO_POLICIES_SOURCE, ServiceMeshPolicyReport};
pub use error::PolicyDomainError;
pub use report::{PolicyReport, PolicySnapshot, UNKNOWN_SOURCE};
