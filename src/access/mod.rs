//! Caller access control and operation metrics for Curator entry points.
//!
//! Every public Curator operation accepts an optional [`domain::CallerContext`].
//! When one is supplied, the [`AccessGuard`] consults the injected
//! [`ports::PermissionChecker`] and [`ports::TenantValidator`] before the
//! operation reaches any registry, and records the outcome through the
//! [`ports::MetricsSink`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

mod guard;

pub use guard::AccessGuard;

#[cfg(test)]
mod tests;
