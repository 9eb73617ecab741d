//! Then steps for route discovery scenarios.

use super::world::RouteWorld;
use rstest_bdd_macros::then;

fn discovered_ids(world: &RouteWorld) -> Result<Vec<String>, eyre::Report> {
    let routes = world
        .discovered
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no discovery has run"))?;
    Ok(routes
        .iter()
        .map(|route| route.id().as_str().to_owned())
        .collect())
}

#[then(r#"the discovered routes are "{ids}""#)]
fn discovered_routes_are(world: &RouteWorld, ids: String) -> Result<(), eyre::Report> {
    let expected: Vec<String> = ids.split(',').map(|id| id.trim().to_owned()).collect();
    let actual = discovered_ids(world)?;
    if actual != expected {
        return Err(eyre::eyre!("expected routes {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("no routes are discovered")]
fn no_routes_discovered(world: &RouteWorld) -> Result<(), eyre::Report> {
    let actual = discovered_ids(world)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected no routes, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the last operation fails with code "{code}""#)]
fn last_operation_fails(world: &RouteWorld, code: String) -> Result<(), eyre::Report> {
    match world.last_error_code.as_deref() {
        Some(actual) if actual == code => Ok(()),
        other => Err(eyre::eyre!("expected error code {code}, found {other:?}")),
    }
}
