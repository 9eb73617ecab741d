//! Supervision of long-lived background tasks keyed by agent.
//!
//! Health checks, capability checks, and the specialization rollup all run as
//! cancellable periodic loops. [`MonitorSupervisor`] owns one
//! [`CancellationToken`](tokio_util::sync::CancellationToken) and join handle
//! per key, so starting a monitor twice is a no-op and shutdown can cancel and
//! await everything it started.

mod periodic;
mod supervisor;

pub use periodic::run_periodic;
pub use supervisor::{MonitorError, MonitorSupervisor};
