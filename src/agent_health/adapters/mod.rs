//! Adapter implementations for agent health ports.

mod reported;

pub use reported::{ReportedHealthProbe, ReportedProbeError};
