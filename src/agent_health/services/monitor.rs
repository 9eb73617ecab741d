//! Per-agent health monitoring service.

use crate::agent_health::{
    domain::{
        AgentHealthMetrics, AgentHealthReport, AlertLog, HealthAlert, HealthDomainError,
        HealthHistory, HealthHistoryEntry, HealthSummary, HealthTrends,
    },
    ports::{AgentHealthProbe, ProbeError},
};
use crate::config::HealthMonitorConfig;
use crate::monitor::{MonitorError, MonitorSupervisor, run_periodic};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for agent health monitoring.
#[derive(Debug, Error)]
pub enum AgentHealthMonitorError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] HealthDomainError),
    /// The probe could not sample the agent.
    #[error(transparent)]
    Probe(#[from] ProbeError),
    /// The agent is not registered for monitoring.
    #[error("agent {0} is not monitored")]
    NotMonitored(String),
    /// The background monitor could not be managed.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    /// The health state lock was poisoned.
    #[error("agent health state poisoned: {0}")]
    StatePoisoned(String),
}

/// Result type for agent health monitoring operations.
pub type AgentHealthMonitorResult<T> = Result<T, AgentHealthMonitorError>;

#[derive(Debug)]
struct AgentRecord {
    metrics: AgentHealthMetrics,
    history: HealthHistory,
    alerts: AlertLog,
}

#[derive(Debug, Default)]
struct MonitorState {
    agents: BTreeMap<String, AgentRecord>,
}

/// Tracks health metrics, history, and alerts for monitored agents.
pub struct AgentHealthMonitor<C>
where
    C: Clock + Send + Sync + 'static,
{
    state: Arc<RwLock<MonitorState>>,
    probe: Arc<dyn AgentHealthProbe>,
    supervisor: MonitorSupervisor,
    config: Arc<HealthMonitorConfig>,
    clock: Arc<C>,
}

impl<C> Clone for AgentHealthMonitor<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            probe: Arc::clone(&self.probe),
            supervisor: self.supervisor.clone(),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> AgentHealthMonitorError {
    AgentHealthMonitorError::StatePoisoned(err.to_string())
}

impl<C> AgentHealthMonitor<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a monitor sampling agents through `probe`.
    #[must_use]
    pub fn new(
        probe: Arc<dyn AgentHealthProbe>,
        config: HealthMonitorConfig,
        clock: Arc<C>,
    ) -> Self {
        Self {
            state: Arc::default(),
            probe,
            supervisor: MonitorSupervisor::new("agent_health"),
            config: Arc::new(config),
            clock,
        }
    }

    fn read_state<T>(&self, read: impl FnOnce(&MonitorState) -> T) -> AgentHealthMonitorResult<T> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(read(&state))
    }

    fn write_state<T>(
        &self,
        write: impl FnOnce(&mut MonitorState) -> T,
    ) -> AgentHealthMonitorResult<T> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(write(&mut state))
    }

    /// Starts monitoring an agent.
    ///
    /// The first registration creates an `unknown` record with empty history
    /// and alerts; later registrations only refresh the display name. The
    /// background task is spawned once per agent when monitoring is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError`] when the agent id is blank, the
    /// state is poisoned, or the task cannot be spawned.
    pub fn register_agent(
        &self,
        agent_id: &str,
        agent_name: &str,
    ) -> AgentHealthMonitorResult<AgentHealthMetrics> {
        let id = agent_id.trim();
        if id.is_empty() {
            return Err(HealthDomainError::EmptyAgentId.into());
        }
        let config = Arc::clone(&self.config);
        // The task is spawned while the state lock is held so a concurrent
        // unregister cannot remove the record between insert and spawn.
        let metrics = self.write_state(|state| {
            let record = state.agents.entry(id.to_owned()).or_insert_with(|| AgentRecord {
                metrics: AgentHealthMetrics::unknown(id, agent_name),
                history: HealthHistory::new(config.history_capacity),
                alerts: AlertLog::new(config.alert_log_capacity, config.alert_dedup_window),
            });
            agent_name.clone_into(&mut record.metrics.agent_name);
            let metrics = record.metrics.clone();
            if config.enabled {
                self.start_monitor(id)?;
            }
            Ok::<_, MonitorError>(metrics)
        })??;
        info!(agent_id = id, agent_name, "agent registered for health monitoring");
        Ok(metrics)
    }

    fn start_monitor(&self, agent_id: &str) -> Result<bool, MonitorError> {
        let monitor = self.clone();
        let key = agent_id.to_owned();
        let period = self.config.check_interval();
        self.supervisor.start(agent_id, move |token| async move {
            run_periodic("agent_health", key.clone(), period, token, || {
                let cycle_monitor = monitor.clone();
                let cycle_agent = key.clone();
                async move {
                    cycle_monitor
                        .run_health_check(&cycle_agent)
                        .await
                        .map(|_| ())
                }
            })
            .await;
        })
    }

    /// Stops monitoring an agent and discards its record.
    ///
    /// Returns whether the agent was monitored.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError`] when state or the task table is
    /// poisoned.
    pub fn unregister_agent(&self, agent_id: &str) -> AgentHealthMonitorResult<bool> {
        let id = agent_id.trim();
        let removed = self.write_state(|state| {
            self.supervisor.stop(id)?;
            Ok::<_, MonitorError>(state.agents.remove(id).is_some())
        })??;
        if removed {
            info!(agent_id = id, "agent unregistered from health monitoring");
        }
        Ok(removed)
    }

    /// Runs one full check cycle for an agent: sample, classify, record
    /// history, raise alerts.
    ///
    /// A failed sample leaves the previous metrics untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::NotMonitored`] for unknown agents,
    /// or probe and validation errors for a failed sample.
    pub async fn run_health_check(
        &self,
        agent_id: &str,
    ) -> AgentHealthMonitorResult<AgentHealthMetrics> {
        let id = agent_id.trim();
        if !self.read_state(|state| state.agents.contains_key(id))? {
            return Err(AgentHealthMonitorError::NotMonitored(id.to_owned()));
        }

        let observation = match self.probe.observe(id).await {
            Ok(sample) => sample,
            Err(err) => {
                warn!(agent_id = id, error = %err, "health probe failed; keeping previous metrics");
                return Err(err.into());
            }
        };
        observation.validate()?;

        let now = self.clock.utc();
        let thresholds = self.config.thresholds;
        let retention = self.config.alert_retention;
        let status = thresholds.classify(&observation);
        let outcome = self.write_state(|state| {
            let record = state.agents.get_mut(id)?;
            record.metrics.apply(observation, status, now);
            record
                .history
                .push(HealthHistoryEntry::capture(&record.metrics, now));
            let raised = HealthAlert::evaluate(&record.metrics, &thresholds, now);
            let stored = raised
                .into_iter()
                .filter(|alert| record.alerts.push(alert.clone()))
                .count();
            record.metrics.alerts = record.alerts.recent(retention);
            Some((record.metrics.clone(), stored))
        })?;

        let Some((metrics, stored_alerts)) = outcome else {
            return Err(AgentHealthMonitorError::NotMonitored(id.to_owned()));
        };
        debug!(
            agent_id = id,
            status = %metrics.overall_status,
            stored_alerts,
            "health check completed"
        );
        Ok(metrics)
    }

    /// Returns an agent's current metrics.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_agent_health(
        &self,
        agent_id: &str,
    ) -> AgentHealthMonitorResult<Option<AgentHealthMetrics>> {
        self.read_state(|state| {
            state
                .agents
                .get(agent_id.trim())
                .map(|record| record.metrics.clone())
        })
    }

    fn report_for(&self, record: &AgentRecord) -> AgentHealthReport {
        let trends = HealthTrends::analyse(&record.history, self.config.trend_window);
        AgentHealthReport::build(&record.metrics, &self.config.thresholds, trends)
    }

    /// Returns an agent's derived health report.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_agent_health_report(
        &self,
        agent_id: &str,
    ) -> AgentHealthMonitorResult<Option<AgentHealthReport>> {
        self.read_state(|state| {
            state
                .agents
                .get(agent_id.trim())
                .map(|record| self.report_for(record))
        })
    }

    /// Returns the report of every monitored agent, ordered by agent id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_all_agent_health_reports(&self) -> AgentHealthMonitorResult<Vec<AgentHealthReport>> {
        self.read_state(|state| {
            state
                .agents
                .values()
                .map(|record| self.report_for(record))
                .collect()
        })
    }

    /// Returns the fleet-wide summary.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_health_summary(&self) -> AgentHealthMonitorResult<HealthSummary> {
        let now = self.clock.utc();
        self.read_state(|state| {
            HealthSummary::build(
                state
                    .agents
                    .values()
                    .map(|record| (&record.metrics, &record.alerts)),
                now,
            )
        })
    }

    /// Returns an agent's history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::StatePoisoned`] when state is
    /// poisoned.
    pub fn get_health_history(
        &self,
        agent_id: &str,
    ) -> AgentHealthMonitorResult<Option<Vec<HealthHistoryEntry>>> {
        self.read_state(|state| {
            state
                .agents
                .get(agent_id.trim())
                .map(|record| record.history.entries())
        })
    }

    /// Returns the number of monitored agents.
    ///
    /// # Errors
    ///
    /// Returns [`AgentHealthMonitorError::StatePoisoned`] when state is
    /// poisoned.
    pub fn monitored_count(&self) -> AgentHealthMonitorResult<usize> {
        self.read_state(|state| state.agents.len())
    }

    /// Returns the number of live background tasks.
    #[must_use]
    pub fn running_monitors(&self) -> usize {
        self.supervisor.running_count()
    }

    /// Returns whether a background task is live for `agent_id`.
    #[must_use]
    pub fn is_monitoring(&self, agent_id: &str) -> bool {
        self.supervisor.is_running(agent_id.trim())
    }

    /// Cancels every background task and waits for them to finish.
    pub async fn shutdown(&self) {
        self.supervisor.shutdown().await;
    }
}
