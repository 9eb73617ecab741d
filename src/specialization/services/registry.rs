//! Agent specialization registry service.

use crate::config::SpecializationAnalyticsConfig;
use crate::monitor::{MonitorError, MonitorSupervisor, run_periodic};
use crate::specialization::{
    domain::{
        AgentSpecialization, CatalogSpecialization, SpecializationAnalytics,
        SpecializationDomainError, SpecializationHealthReport, SpecializationRequest,
        SpecializationUsage,
    },
    ports::{SpecializationCatalog, SpecializationCatalogError},
};
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info};

const ANALYTICS_TASK: &str = "analytics";

/// Service-level errors for the specialization registry.
#[derive(Debug, Error)]
pub enum AgentSpecializationRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SpecializationDomainError),
    /// The catalog does not know the specialization.
    #[error("specialization {0} is not in the catalog")]
    UnknownSpecialization(String),
    /// The agent has no specialization binding.
    #[error("agent {0} has no specialization")]
    NotRegistered(String),
    /// The catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] SpecializationCatalogError),
    /// The analytics task could not be managed.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    /// The registry lock was poisoned.
    #[error("specialization state poisoned: {0}")]
    StatePoisoned(String),
}

/// Result type for specialization registry operations.
pub type AgentSpecializationRegistryResult<T> = Result<T, AgentSpecializationRegistryError>;

#[derive(Debug, Default)]
struct RegistryState {
    agents: BTreeMap<String, AgentSpecialization>,
    usage: BTreeMap<String, SpecializationUsage>,
    specialization_agents: BTreeMap<String, BTreeSet<String>>,
    pillar_specializations: BTreeMap<String, BTreeSet<String>>,
    analytics: BTreeMap<String, SpecializationAnalytics>,
}

impl RegistryState {
    fn index(&mut self, pillar: &str, specialization_id: &str) {
        self.pillar_specializations
            .entry(pillar.to_owned())
            .or_default()
            .insert(specialization_id.to_owned());
        self.specialization_agents
            .entry(specialization_id.to_owned())
            .or_default();
    }
}

/// Binds agents to specializations and rolls their usage up into analytics.
pub struct AgentSpecializationRegistry<C>
where
    C: Clock + Send + Sync + 'static,
{
    state: Arc<RwLock<RegistryState>>,
    catalog: Option<Arc<dyn SpecializationCatalog>>,
    supervisor: MonitorSupervisor,
    config: Arc<SpecializationAnalyticsConfig>,
    clock: Arc<C>,
}

impl<C> Clone for AgentSpecializationRegistry<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            catalog: self.catalog.clone(),
            supervisor: self.supervisor.clone(),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> AgentSpecializationRegistryError {
    AgentSpecializationRegistryError::StatePoisoned(err.to_string())
}

impl<C> AgentSpecializationRegistry<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a registry that accepts any specialization id.
    #[must_use]
    pub fn new(config: SpecializationAnalyticsConfig, clock: Arc<C>) -> Self {
        Self {
            state: Arc::default(),
            catalog: None,
            supervisor: MonitorSupervisor::new("specialization"),
            config: Arc::new(config),
            clock,
        }
    }

    /// Validates bindings against `catalog` and enriches analytics from it.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn SpecializationCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    fn read_state<T>(
        &self,
        read: impl FnOnce(&RegistryState) -> T,
    ) -> AgentSpecializationRegistryResult<T> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(read(&state))
    }

    fn write_state<T>(
        &self,
        write: impl FnOnce(&mut RegistryState) -> T,
    ) -> AgentSpecializationRegistryResult<T> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(write(&mut state))
    }

    /// Preloads the catalog into the indexes and starts the analytics task.
    ///
    /// Returns the number of catalog entries loaded.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError`] when the catalog cannot be
    /// read or the analytics task cannot be spawned.
    pub async fn initialize(&self) -> AgentSpecializationRegistryResult<usize> {
        let entries = match &self.catalog {
            Some(catalog) => catalog.list_all().await?,
            None => Vec::new(),
        };
        let loaded = entries.len();
        self.write_state(|state| {
            for entry in &entries {
                state.index(&entry.pillar, &entry.id);
            }
        })?;

        if self.config.analytics_enabled {
            self.start_analytics()?;
        }
        info!(loaded, "specialization registry initialised");
        Ok(loaded)
    }

    fn start_analytics(&self) -> Result<bool, MonitorError> {
        let registry = self.clone();
        let period = self.config.analytics_interval();
        self.supervisor.start(ANALYTICS_TASK, move |token| async move {
            run_periodic(
                "specialization_analytics",
                ANALYTICS_TASK.to_owned(),
                period,
                token,
                || {
                    let cycle_registry = registry.clone();
                    async move { cycle_registry.refresh_analytics().await.map(|_| ()) }
                },
            )
            .await;
        })
    }

    /// Binds an agent to the specialization described by `request`.
    ///
    /// Rebinding replaces the previous binding, moves the agent between
    /// specialization buckets, and resets its usage tracking.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::Domain`] for blank ids and
    /// [`AgentSpecializationRegistryError::UnknownSpecialization`] when a
    /// catalog is wired in and does not list the id.
    pub async fn register_agent_specialization(
        &self,
        agent_id: &str,
        agent_name: &str,
        request: SpecializationRequest,
    ) -> AgentSpecializationRegistryResult<AgentSpecialization> {
        let binding = AgentSpecialization::bind(agent_id, agent_name, request, self.clock.utc())?;
        if let Some(catalog) = &self.catalog
            && catalog.get(&binding.specialization_id).await?.is_none()
        {
            return Err(AgentSpecializationRegistryError::UnknownSpecialization(
                binding.specialization_id,
            ));
        }

        let previous = self.write_state(|state| {
            let previous = state.agents.remove(&binding.agent_id);
            if let Some(old) = &previous
                && let Some(members) = state.specialization_agents.get_mut(&old.specialization_id)
            {
                members.remove(&old.agent_id);
            }
            state.index(&binding.pillar, &binding.specialization_id);
            state
                .specialization_agents
                .entry(binding.specialization_id.clone())
                .or_default()
                .insert(binding.agent_id.clone());
            state
                .usage
                .insert(binding.agent_id.clone(), SpecializationUsage::default());
            state
                .agents
                .insert(binding.agent_id.clone(), binding.clone());
            previous.map(|old| old.specialization_id)
        })?;

        info!(
            agent_id = %binding.agent_id,
            specialization_id = %binding.specialization_id,
            previous = previous.as_deref().unwrap_or("none"),
            "agent specialization registered"
        );
        Ok(binding)
    }

    /// Records one use of an agent in its specialization.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::NotRegistered`] when the
    /// agent has no binding.
    pub fn update_specialization_usage(
        &self,
        agent_id: &str,
        success: bool,
        capability_used: Option<&str>,
    ) -> AgentSpecializationRegistryResult<AgentSpecialization> {
        let id = agent_id.trim();
        let now = self.clock.utc();
        let updated = self.write_state(|state| {
            let binding = state.agents.get_mut(id)?;
            let usage = state.usage.entry(id.to_owned()).or_default();
            usage.record(success, capability_used, now);
            binding.sync_usage(usage, now);
            Some(binding.clone())
        })?;
        updated.ok_or_else(|| AgentSpecializationRegistryError::NotRegistered(id.to_owned()))
    }

    /// Re-derives analytics for every bound specialization from live records.
    ///
    /// The previous analytics are replaced wholesale. Returns the number of
    /// specializations with analytics.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError`] when the catalog cannot be
    /// read or state is poisoned.
    pub async fn refresh_analytics(&self) -> AgentSpecializationRegistryResult<usize> {
        let bound: Vec<String> = self.read_state(|state| {
            state
                .specialization_agents
                .iter()
                .filter(|(_, members)| !members.is_empty())
                .map(|(id, _)| id.clone())
                .collect()
        })?;

        let mut catalog_entries: BTreeMap<String, CatalogSpecialization> = BTreeMap::new();
        if let Some(catalog) = &self.catalog {
            for id in &bound {
                if let Some(entry) = catalog.get(id).await? {
                    catalog_entries.insert(id.clone(), entry);
                }
            }
        }

        let now = self.clock.utc();
        let refreshed = self.write_state(|state| {
            let analytics: BTreeMap<String, SpecializationAnalytics> = state
                .specialization_agents
                .iter()
                .filter_map(|(id, members)| {
                    let agents: Vec<&AgentSpecialization> = members
                        .iter()
                        .filter_map(|agent_id| state.agents.get(agent_id))
                        .collect();
                    SpecializationAnalytics::derive(id, &agents, catalog_entries.get(id), now)
                        .map(|entry| (id.clone(), entry))
                })
                .collect();
            let count = analytics.len();
            state.analytics = analytics;
            count
        })?;
        debug!(specializations = refreshed, "specialization analytics refreshed");
        Ok(refreshed)
    }

    /// Returns an agent's binding.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_agent_specialization(
        &self,
        agent_id: &str,
    ) -> AgentSpecializationRegistryResult<Option<AgentSpecialization>> {
        self.read_state(|state| state.agents.get(agent_id.trim()).cloned())
    }

    /// Returns an agent's usage counters.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_specialization_usage(
        &self,
        agent_id: &str,
    ) -> AgentSpecializationRegistryResult<Option<SpecializationUsage>> {
        self.read_state(|state| state.usage.get(agent_id.trim()).cloned())
    }

    /// Returns the latest analytics for one specialization.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_specialization_analytics(
        &self,
        specialization_id: &str,
    ) -> AgentSpecializationRegistryResult<Option<SpecializationAnalytics>> {
        self.read_state(|state| state.analytics.get(specialization_id.trim()).cloned())
    }

    /// Returns the latest analytics for every specialization, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_all_specialization_analytics(
        &self,
    ) -> AgentSpecializationRegistryResult<Vec<SpecializationAnalytics>> {
        self.read_state(|state| state.analytics.values().cloned().collect())
    }

    /// Returns the specialization ids known for `pillar`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_pillar_specializations(
        &self,
        pillar: &str,
    ) -> AgentSpecializationRegistryResult<Vec<String>> {
        self.read_state(|state| {
            state
                .pillar_specializations
                .get(pillar.trim())
                .map(|ids| ids.iter().cloned().collect())
                .unwrap_or_default()
        })
    }

    /// Returns the agents bound to `specialization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_agents_by_specialization(
        &self,
        specialization_id: &str,
    ) -> AgentSpecializationRegistryResult<Vec<String>> {
        self.read_state(|state| {
            state
                .specialization_agents
                .get(specialization_id.trim())
                .map(|ids| ids.iter().cloned().collect())
                .unwrap_or_default()
        })
    }

    /// Returns the fleet-wide specialization health report.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn get_specialization_health_report(
        &self,
    ) -> AgentSpecializationRegistryResult<SpecializationHealthReport> {
        let now = self.clock.utc();
        self.read_state(|state| {
            SpecializationHealthReport::build(
                state.specialization_agents.len(),
                state.agents.len(),
                state.analytics.values(),
                &state.pillar_specializations,
                now,
            )
        })
    }

    /// Returns the number of bound agents.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn agent_count(&self) -> AgentSpecializationRegistryResult<usize> {
        self.read_state(|state| state.agents.len())
    }

    /// Returns the number of known specializations.
    ///
    /// # Errors
    ///
    /// Returns [`AgentSpecializationRegistryError::StatePoisoned`] when state
    /// is poisoned.
    pub fn specialization_count(&self) -> AgentSpecializationRegistryResult<usize> {
        self.read_state(|state| state.specialization_agents.len())
    }

    /// Returns whether the analytics task is running.
    #[must_use]
    pub fn analytics_running(&self) -> bool {
        self.supervisor.is_running(ANALYTICS_TASK)
    }

    /// Stops the analytics task and waits for it to finish.
    pub async fn shutdown(&self) {
        self.supervisor.shutdown().await;
    }
}
