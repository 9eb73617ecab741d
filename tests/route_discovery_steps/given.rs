//! Given steps for route discovery scenarios.

use super::world::{RouteWorld, run_async};
use curator::route::domain::RouteMetadata;
use rstest_bdd_macros::given;

#[given("an empty route registry")]
fn empty_registry(world: &mut RouteWorld) -> Result<(), eyre::Report> {
    let status = run_async(world.curator.status())
        .into_data()
        .ok_or_else(|| eyre::eyre!("curator status unavailable"))?;
    if status.routes != 0 {
        return Err(eyre::eyre!("expected no routes, found {}", status.routes));
    }
    Ok(())
}

#[given(
    r#"route "{route_id}" at "{path}" in pillar "{pillar}" realm "{realm}" for service "{service}""#
)]
fn route_registered(
    world: &mut RouteWorld,
    route_id: String,
    path: String,
    pillar: String,
    realm: String,
    service: String,
) -> Result<(), eyre::Report> {
    let metadata = RouteMetadata::new(route_id, path)
        .with_pillar(pillar)
        .with_realm(realm)
        .with_service(service);
    let response = run_async(world.curator.register_route(None, metadata));
    if !response.is_success() {
        return Err(eyre::eyre!("route registration failed: {:?}", response.error));
    }
    Ok(())
}
