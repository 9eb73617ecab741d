//! Port contracts for agent health sampling.

pub mod probe;

pub use probe::{AgentHealthProbe, ProbeError};

#[cfg(test)]
pub use probe::MockAgentHealthProbe;
