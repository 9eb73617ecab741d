//! Given steps for agent health scenarios.

use super::world::{HealthWorld, run_async};
use rstest_bdd_macros::given;

#[given("a curator with background monitoring disabled")]
fn curator_without_monitors(world: &mut HealthWorld) -> Result<(), eyre::Report> {
    if world.curator.config().health.enabled {
        return Err(eyre::eyre!("health monitoring should be disabled"));
    }
    Ok(())
}

#[given(r#"agent "{agent_id}" named "{agent_name}" is registered for monitoring"#)]
fn agent_registered(
    world: &mut HealthWorld,
    agent_id: String,
    agent_name: String,
) -> Result<(), eyre::Report> {
    let response = run_async(
        world
            .curator
            .register_agent_for_monitoring(None, &agent_id, &agent_name),
    );
    if !response.is_success() {
        return Err(eyre::eyre!("registration failed: {:?}", response.error));
    }
    Ok(())
}
