//! Probe serving the latest self-reported observation per agent.

use crate::agent_health::{
    domain::{HealthDomainError, HealthObservation},
    ports::{AgentHealthProbe, ProbeError},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors raised when recording or dropping self-reported observations.
#[derive(Debug, Error)]
pub enum ReportedProbeError {
    /// The agent id or observation was invalid.
    #[error(transparent)]
    Domain(#[from] HealthDomainError),

    /// The observation store lock was poisoned.
    #[error("observation store poisoned: {0}")]
    StatePoisoned(String),
}

fn poisoned(err: impl Display) -> ReportedProbeError {
    ReportedProbeError::StatePoisoned(err.to_string())
}

/// Agents push observations here; the monitor reads the latest one.
#[derive(Debug, Clone, Default)]
pub struct ReportedHealthProbe {
    observations: Arc<RwLock<HashMap<String, HealthObservation>>>,
}

impl ReportedHealthProbe {
    /// Creates a probe with no observations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `observation` as the latest for `agent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportedProbeError::Domain`] when the agent id is blank or
    /// the observation is out of range, and
    /// [`ReportedProbeError::StatePoisoned`] when the store is poisoned.
    pub fn report_observation(
        &self,
        agent_id: &str,
        observation: HealthObservation,
    ) -> Result<(), ReportedProbeError> {
        let id = agent_id.trim();
        if id.is_empty() {
            return Err(HealthDomainError::EmptyAgentId.into());
        }
        observation.validate()?;
        let mut observations = self.observations.write().map_err(poisoned)?;
        observations.insert(id.to_owned(), observation);
        Ok(())
    }

    /// Drops the stored observation for `agent_id`.
    ///
    /// Returns whether an observation was stored.
    ///
    /// # Errors
    ///
    /// Returns [`ReportedProbeError::StatePoisoned`] when the store is
    /// poisoned.
    pub fn forget(&self, agent_id: &str) -> Result<bool, ReportedProbeError> {
        let mut observations = self.observations.write().map_err(poisoned)?;
        Ok(observations.remove(agent_id.trim()).is_some())
    }
}

#[async_trait]
impl AgentHealthProbe for ReportedHealthProbe {
    async fn observe(&self, agent_id: &str) -> Result<HealthObservation, ProbeError> {
        let observations = self
            .observations
            .read()
            .map_err(|err| ProbeError::Unreachable {
                agent_id: agent_id.to_owned(),
                reason: err.to_string(),
            })?;
        observations
            .get(agent_id)
            .cloned()
            .ok_or_else(|| ProbeError::NoObservation(agent_id.to_owned()))
    }
}
