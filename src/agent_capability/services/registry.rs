//! Agent capability registry service.

use crate::agent_capability::domain::{
    AgentCapability, AgentCapabilityDomainError, AgentCapabilityReport, AgentCapabilitySpec,
    CapabilityAnalytics, CapabilityHealthCheck, CapabilityPlacement, CapabilityUsage,
};
use crate::config::CapabilityMonitorConfig;
use crate::monitor::{MonitorError, MonitorSupervisor, run_periodic};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for the agent capability registry.
#[derive(Debug, Error)]
pub enum AgentCapabilityRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AgentCapabilityDomainError),
    /// The background monitor could not be managed.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    /// The registry lock was poisoned.
    #[error("agent capability state poisoned: {0}")]
    StatePoisoned(String),
}

/// Result type for agent capability registry operations.
pub type AgentCapabilityRegistryResult<T> = Result<T, AgentCapabilityRegistryError>;

/// Capabilities published by one agent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentCapabilityRegistration {
    /// Agent identifier.
    pub agent_id: String,
    /// Agent display name.
    pub agent_name: String,
    /// Declared capabilities; replaces any earlier list.
    #[serde(default)]
    pub capabilities: Vec<AgentCapabilitySpec>,
    /// Pillar and specialization the capabilities serve.
    #[serde(flatten)]
    pub placement: CapabilityPlacement,
}

impl AgentCapabilityRegistration {
    /// Creates a registration with no capabilities.
    #[must_use]
    pub fn new(agent_id: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: agent_name.into(),
            capabilities: Vec::new(),
            placement: CapabilityPlacement::default(),
        }
    }

    /// Adds a capability.
    #[must_use]
    pub fn with_capability(mut self, capability: AgentCapabilitySpec) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Sets the pillar.
    #[must_use]
    pub fn with_pillar(mut self, pillar: impl Into<String>) -> Self {
        self.placement.pillar = Some(pillar.into());
        self
    }

    /// Sets the specialization.
    #[must_use]
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.placement.specialization = Some(specialization.into());
        self
    }

    fn validate(&self) -> Result<(), AgentCapabilityDomainError> {
        if self.agent_id.trim().is_empty() {
            return Err(AgentCapabilityDomainError::EmptyAgentId);
        }
        let mut seen = BTreeSet::new();
        for spec in &self.capabilities {
            let name = spec.name.trim();
            if name.is_empty() {
                return Err(AgentCapabilityDomainError::EmptyCapabilityName);
            }
            if !seen.insert(name) {
                return Err(AgentCapabilityDomainError::DuplicateCapabilityName(
                    name.to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct AgentEntry {
    agent_name: String,
    capabilities: Vec<AgentCapability>,
}

#[derive(Debug, Default)]
struct RegistryState {
    agents: BTreeMap<String, AgentEntry>,
    capability_index: BTreeMap<String, String>,
    usage: BTreeMap<String, CapabilityUsage>,
    health_checks: BTreeMap<String, CapabilityHealthCheck>,
}

/// Tracks the capabilities each agent offers and how they are used.
pub struct AgentCapabilityRegistry<C>
where
    C: Clock + Send + Sync + 'static,
{
    state: Arc<RwLock<RegistryState>>,
    supervisor: MonitorSupervisor,
    config: Arc<CapabilityMonitorConfig>,
    clock: Arc<C>,
}

impl<C> Clone for AgentCapabilityRegistry<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            supervisor: self.supervisor.clone(),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> AgentCapabilityRegistryError {
    AgentCapabilityRegistryError::StatePoisoned(err.to_string())
}

impl<C> AgentCapabilityRegistry<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: CapabilityMonitorConfig, clock: Arc<C>) -> Self {
        Self {
            state: Arc::default(),
            supervisor: MonitorSupervisor::new("agent_capability"),
            config: Arc::new(config),
            clock,
        }
    }

    fn read_state<T>(
        &self,
        read: impl FnOnce(&RegistryState) -> T,
    ) -> AgentCapabilityRegistryResult<T> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(read(&state))
    }

    fn write_state<T>(
        &self,
        write: impl FnOnce(&mut RegistryState) -> T,
    ) -> AgentCapabilityRegistryResult<T> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(write(&mut state))
    }

    /// Replaces an agent's capability list.
    ///
    /// Every capability name is pointed at this agent in the global index;
    /// the last agent to register a name wins. Index entries for names the
    /// agent no longer lists are dropped. The agent's capability monitor
    /// is started on first registration when monitoring is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::Domain`] when the agent id or a
    /// capability name is blank, or a name repeats within the list.
    pub fn register_agent_capabilities(
        &self,
        registration: AgentCapabilityRegistration,
    ) -> AgentCapabilityRegistryResult<Vec<AgentCapability>> {
        registration.validate()?;
        let AgentCapabilityRegistration {
            agent_id,
            agent_name,
            capabilities,
            placement,
        } = registration;
        let id = agent_id.trim().to_owned();
        let now = self.clock.utc();
        let registered: Vec<AgentCapability> = capabilities
            .into_iter()
            .map(|spec| AgentCapability::from_spec(&id, &agent_name, spec, &placement, now))
            .collect();

        self.write_state(|state| {
            state.capability_index.retain(|_, owner| *owner != id);
            for capability in &registered {
                state
                    .capability_index
                    .insert(capability.capability_name.clone(), id.clone());
            }
            state.agents.insert(
                id.clone(),
                AgentEntry {
                    agent_name: agent_name.clone(),
                    capabilities: registered.clone(),
                },
            );
            // Spawned under the state lock so unregister cannot slip in
            // between the insert and the spawn.
            if self.config.enabled {
                self.start_monitor(&id)?;
            }
            Ok::<_, MonitorError>(())
        })??;

        info!(
            agent_id = %id,
            agent_name = %agent_name,
            capabilities = registered.len(),
            "agent capabilities registered"
        );
        Ok(registered)
    }

    fn start_monitor(&self, agent_id: &str) -> Result<bool, MonitorError> {
        let registry = self.clone();
        let key = agent_id.to_owned();
        let period = self.config.check_interval();
        self.supervisor.start(agent_id, move |token| async move {
            run_periodic("agent_capability", key.clone(), period, token, || {
                let cycle_registry = registry.clone();
                let cycle_agent = key.clone();
                async move {
                    cycle_registry
                        .check_agent_capabilities(&cycle_agent)
                        .map(|_| ())
                }
            })
            .await;
        })
    }

    /// Checks an agent's capabilities and stores the outcome.
    ///
    /// Returns `None` when the agent has no registered capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn check_agent_capabilities(
        &self,
        agent_id: &str,
    ) -> AgentCapabilityRegistryResult<Option<CapabilityHealthCheck>> {
        let now = self.clock.utc();
        let unused_after_days = self.config.unused_after_days;
        let check = self.write_state(|state| {
            let entry = state.agents.get(agent_id)?;
            let outcome =
                CapabilityHealthCheck::evaluate(&entry.capabilities, unused_after_days, now);
            state
                .health_checks
                .insert(agent_id.to_owned(), outcome.clone());
            Some(outcome)
        })?;
        if let Some(result) = &check {
            debug!(
                agent_id,
                status = %result.status,
                issues = result.issues.len(),
                "capability check completed"
            );
        }
        Ok(check)
    }

    /// Records one use of `capability_name` by `agent_id`.
    ///
    /// Usage is attributed to the pillar and specialization of the agent's
    /// matching capability, whose own counter is incremented too.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::Domain`] for blank names.
    pub fn update_capability_usage(
        &self,
        capability_name: &str,
        agent_id: &str,
    ) -> AgentCapabilityRegistryResult<CapabilityUsage> {
        let name = capability_name.trim();
        if name.is_empty() {
            return Err(AgentCapabilityDomainError::EmptyCapabilityName.into());
        }
        let id = agent_id.trim();
        if id.is_empty() {
            return Err(AgentCapabilityDomainError::EmptyAgentId.into());
        }
        let now = self.clock.utc();
        self.write_state(|state| {
            let capability = state
                .agents
                .get_mut(id)
                .and_then(|entry| {
                    entry
                        .capabilities
                        .iter_mut()
                        .find(|capability| capability.capability_name == name)
                });
            let placement = capability.map(|matched| {
                matched.record_use(now);
                (matched.pillar.clone(), matched.specialization.clone())
            });
            let (pillar, specialization) = placement.unwrap_or_default();
            let usage = state.usage.entry(name.to_owned()).or_default();
            usage.record(id, pillar.as_deref(), specialization.as_deref(), now);
            usage.clone()
        })
    }

    /// Returns an agent's capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_agent_capabilities(
        &self,
        agent_id: &str,
    ) -> AgentCapabilityRegistryResult<Option<Vec<AgentCapability>>> {
        self.read_state(|state| {
            state
                .agents
                .get(agent_id.trim())
                .map(|entry| entry.capabilities.clone())
        })
    }

    /// Returns the agent currently indexed for `capability_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn find_agent_for_capability(
        &self,
        capability_name: &str,
    ) -> AgentCapabilityRegistryResult<Option<String>> {
        self.read_state(|state| state.capability_index.get(capability_name.trim()).cloned())
    }

    /// Returns usage statistics for `capability_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_capability_usage(
        &self,
        capability_name: &str,
    ) -> AgentCapabilityRegistryResult<Option<CapabilityUsage>> {
        self.read_state(|state| state.usage.get(capability_name.trim()).cloned())
    }

    fn report_for(
        state: &RegistryState,
        agent_id: &str,
        entry: &AgentEntry,
        now: DateTime<Utc>,
    ) -> AgentCapabilityReport {
        AgentCapabilityReport::build(
            agent_id,
            &entry.agent_name,
            &entry.capabilities,
            state.health_checks.get(agent_id),
            now,
        )
    }

    /// Returns the capability report of one agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_agent_capability_report(
        &self,
        agent_id: &str,
    ) -> AgentCapabilityRegistryResult<Option<AgentCapabilityReport>> {
        let now = self.clock.utc();
        let id = agent_id.trim();
        self.read_state(|state| {
            state
                .agents
                .get(id)
                .map(|entry| Self::report_for(state, id, entry, now))
        })
    }

    /// Returns every agent's capability report, ordered by agent id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_all_agent_reports(
        &self,
    ) -> AgentCapabilityRegistryResult<Vec<AgentCapabilityReport>> {
        let now = self.clock.utc();
        self.read_state(|state| {
            state
                .agents
                .iter()
                .map(|(id, entry)| Self::report_for(state, id, entry, now))
                .collect()
        })
    }

    /// Returns fleet-wide capability analytics.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_capability_analytics(&self) -> AgentCapabilityRegistryResult<CapabilityAnalytics> {
        let now = self.clock.utc();
        self.read_state(|state| {
            CapabilityAnalytics::build(
                state
                    .agents
                    .values()
                    .map(|entry| entry.capabilities.as_slice()),
                state.health_checks.values(),
                now,
            )
        })
    }

    /// Removes an agent's capabilities and stops its monitor.
    ///
    /// Index entries are cleared only where they still point at this agent.
    /// Returns whether the agent was registered.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError`] when state or the task table
    /// is poisoned.
    pub fn unregister_agent(&self, agent_id: &str) -> AgentCapabilityRegistryResult<bool> {
        let id = agent_id.trim();
        let removed = self.write_state(|state| {
            self.supervisor.stop(id)?;
            state.health_checks.remove(id);
            state.capability_index.retain(|_, owner| owner.as_str() != id);
            Ok::<_, MonitorError>(state.agents.remove(id).is_some())
        })??;
        if removed {
            info!(agent_id = id, "agent capabilities unregistered");
        }
        Ok(removed)
    }

    /// Returns the number of agents with registered capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`AgentCapabilityRegistryError::StatePoisoned`] when state is
    /// poisoned.
    pub fn agent_count(&self) -> AgentCapabilityRegistryResult<usize> {
        self.read_state(|state| state.agents.len())
    }

    /// Returns the number of live capability monitors.
    #[must_use]
    pub fn running_monitors(&self) -> usize {
        self.supervisor.running_count()
    }

    /// Cancels every capability monitor and waits for them to finish.
    pub async fn shutdown(&self) {
        self.supervisor.shutdown().await;
    }
}
