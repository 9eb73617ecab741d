//! Behaviour tests for agent health monitoring through the Curator facade.

#[path = "agent_health_steps/mod.rs"]
mod agent_health_steps_defs;

use agent_health_steps_defs::world::{HealthWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/agent_health.feature",
    name = "A newly registered agent starts with unknown health"
)]
#[tokio::test(flavor = "multi_thread")]
async fn newly_registered_agent_is_unknown(world: HealthWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/agent_health.feature",
    name = "Slow responses degrade an agent"
)]
#[tokio::test(flavor = "multi_thread")]
async fn slow_responses_degrade(world: HealthWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/agent_health.feature",
    name = "A failing success rate makes an agent unhealthy"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failing_success_rate_is_unhealthy(world: HealthWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/agent_health.feature",
    name = "Values exactly at the thresholds stay healthy"
)]
#[tokio::test(flavor = "multi_thread")]
async fn threshold_values_stay_healthy(world: HealthWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/agent_health.feature",
    name = "Checking an agent that is not monitored fails"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unmonitored_agent_check_fails(world: HealthWorld) {
    let _ = world;
}
