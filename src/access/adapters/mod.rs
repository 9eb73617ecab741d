//! Adapter implementations for the access ports.

mod metrics;
mod permission;

pub use metrics::{InMemoryMetricsSink, NoopMetricsSink, TracingMetricsSink};
pub use permission::{AllowAll, StaticPermissionChecker, StaticTenantValidator};
