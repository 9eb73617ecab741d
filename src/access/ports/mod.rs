//! Port contracts consulted at the Curator access boundary.

pub mod metrics;
pub mod permission;

pub use metrics::{MetricLabels, MetricsSink};
pub use permission::{PermissionChecker, TenantValidator};

#[cfg(test)]
pub use permission::{MockPermissionChecker, MockTenantValidator};
