//! When steps for route discovery scenarios.

use super::world::{RouteWorld, run_async};
use curator::route::domain::{RouteFilter, RouteMetadata};
use rstest_bdd_macros::when;

fn discover(world: &mut RouteWorld, filter: RouteFilter) -> Result<(), eyre::Report> {
    let response = run_async(world.curator.discover_routes(None, filter));
    world.last_error_code = response.error_code().map(str::to_owned);
    let routes = response
        .into_data()
        .ok_or_else(|| eyre::eyre!("route discovery failed"))?;
    world.discovered = Some(routes);
    Ok(())
}

#[when(r#"routes are discovered with pillar "{pillar}" and realm "{realm}""#)]
fn discover_by_pillar_and_realm(
    world: &mut RouteWorld,
    pillar: String,
    realm: String,
) -> Result<(), eyre::Report> {
    discover(world, RouteFilter::any().with_pillar(pillar).with_realm(realm))
}

#[when(r#"routes are discovered in pillar "{pillar}""#)]
fn discover_by_pillar(world: &mut RouteWorld, pillar: String) -> Result<(), eyre::Report> {
    discover(world, RouteFilter::any().with_pillar(pillar))
}

#[when("all routes are discovered")]
fn discover_all(world: &mut RouteWorld) -> Result<(), eyre::Report> {
    discover(world, RouteFilter::any())
}

#[when(r#"route "{route_id}" is registered without a path"#)]
fn register_without_path(world: &mut RouteWorld, route_id: String) {
    let response = run_async(
        world
            .curator
            .register_route(None, RouteMetadata::new(route_id, "")),
    );
    world.last_error_code = response.error_code().map(str::to_owned);
}
