//! Orchestration services for agent health monitoring.

mod monitor;

pub use monitor::{AgentHealthMonitor, AgentHealthMonitorError, AgentHealthMonitorResult};
