//! Then steps for agent health scenarios.

use super::world::{HealthWorld, run_async};
use curator::agent_health::domain::AgentHealthMetrics;
use rstest_bdd_macros::then;

fn health_of(world: &HealthWorld, agent_id: &str) -> Result<AgentHealthMetrics, eyre::Report> {
    run_async(world.curator.get_agent_health(None, agent_id))
        .into_data()
        .ok_or_else(|| eyre::eyre!("agent {agent_id} has no health record"))
}

#[then(r#"agent "{agent_id}" has health status "{status}""#)]
fn agent_has_status(
    world: &HealthWorld,
    agent_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let metrics = health_of(world, &agent_id)?;
    if metrics.overall_status.as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {}",
            metrics.overall_status.as_str()
        ));
    }
    Ok(())
}

#[then(r#"agent "{agent_id}" has {count:usize} alerts"#)]
fn agent_has_alerts(
    world: &HealthWorld,
    agent_id: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let metrics = health_of(world, &agent_id)?;
    if metrics.alerts.len() != count {
        return Err(eyre::eyre!(
            "expected {count} alerts, found {:?}",
            metrics.alerts
        ));
    }
    Ok(())
}

#[then(r#"the last operation fails with code "{code}""#)]
fn last_operation_fails(world: &HealthWorld, code: String) -> Result<(), eyre::Report> {
    match world.last_error_code.as_deref() {
        Some(actual) if actual == code => Ok(()),
        other => Err(eyre::eyre!("expected error code {code}, found {other:?}")),
    }
}
