//! When steps for agent health scenarios.

use super::world::{HealthWorld, run_async};
use curator::agent_health::domain::HealthObservation;
use rstest_bdd_macros::when;

#[when(r#"agent "{agent_id}" named "{agent_name}" is registered for monitoring"#)]
fn register_agent(
    world: &mut HealthWorld,
    agent_id: String,
    agent_name: String,
) -> Result<(), eyre::Report> {
    let response = run_async(
        world
            .curator
            .register_agent_for_monitoring(None, &agent_id, &agent_name),
    );
    world.last_error_code = response.error_code().map(str::to_owned);
    if !response.is_success() {
        return Err(eyre::eyre!("registration failed: {:?}", response.error));
    }
    Ok(())
}

#[when(
    r#"agent "{agent_id}" reports response time {response_time_ms:f64} ms, success rate {success_rate:f64}, error rate {error_rate:f64} and availability {availability:f64}"#
)]
fn agent_reports(
    world: &mut HealthWorld,
    agent_id: String,
    response_time_ms: f64,
    success_rate: f64,
    error_rate: f64,
    availability: f64,
) -> Result<(), eyre::Report> {
    let observation =
        HealthObservation::new(response_time_ms, success_rate, error_rate, availability);
    let response = run_async(
        world
            .curator
            .report_agent_observation(None, &agent_id, observation),
    );
    if !response.is_success() {
        return Err(eyre::eyre!("observation rejected: {:?}", response.error));
    }
    Ok(())
}

#[when(r#"a health check runs for agent "{agent_id}""#)]
fn health_check_runs(world: &mut HealthWorld, agent_id: String) {
    let response = run_async(world.curator.run_health_check(None, &agent_id));
    world.last_error_code = response.error_code().map(str::to_owned);
}
