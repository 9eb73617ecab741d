//! Public facade over every Curator registry and monitor.
//!
//! [`Curator`] is the single entry point callers use. Each operation takes an
//! optional [`CallerContext`](crate::access::domain::CallerContext), runs it
//! through the [`AccessGuard`](crate::access::AccessGuard), delegates to the
//! owning service, and folds the outcome into a [`CuratorResponse`]. Service
//! errors are mapped onto [`CuratorError`](crate::error::CuratorError) so the
//! response carries a stable error code.

mod errors;
mod facade;
mod providers;
mod response;
mod status;

pub use facade::Curator;
pub use providers::CapabilityServiceProvider;
pub use response::CuratorResponse;
pub use status::CuratorStatus;
