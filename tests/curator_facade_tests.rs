//! Integration tests for the [`Curator`] facade.
//!
//! These tests drive the public entry points end to end over the in-memory
//! adapters, checking the response envelope, access control, and the
//! cross-component wiring between registries and discovery.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use std::sync::Arc;

use ::curator::access::{
    AccessGuard,
    adapters::{AllowAll, InMemoryMetricsSink, StaticPermissionChecker, StaticTenantValidator},
    domain::{AccessAction, AccessResource, CallerContext},
};
use ::curator::agent_capability::{
    domain::AgentCapabilitySpec, services::AgentCapabilityRegistration,
};
use ::curator::capability::{
    adapters::memory::InMemoryDiscoveryBackend, services::RegisterCapabilityRequest,
};
use ::curator::config::CuratorConfig;
use ::curator::curator::Curator;
use ::curator::discovery::domain::{ServiceDescriptor, ServiceManifest};
use ::curator::mesh_policy::domain::{AGGREGATED_SOURCE, NO_POLICIES_SOURCE, PolicySnapshot};
use ::curator::specialization::{
    adapters::memory::InMemorySpecializationCatalog,
    domain::{CatalogSpecialization, SpecializationRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn curator() -> Curator<DefaultClock> {
    Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock))
}

fn guarded_curator(
    permissions: StaticPermissionChecker,
    tenants: StaticTenantValidator,
    metrics: &InMemoryMetricsSink,
) -> Curator<DefaultClock> {
    let guard = AccessGuard::new(
        Arc::new(permissions),
        Arc::new(tenants),
        Arc::new(metrics.clone()),
    );
    Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock)).with_access_guard(guard)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capability_lifecycle_through_facade(curator: Curator<DefaultClock>) {
    let registered = curator
        .register_capability(
            None,
            RegisterCapabilityRequest::new("billing", "charge").with_realm("payments"),
        )
        .await
        .into_data()
        .expect("registration should succeed");
    assert_eq!(registered.definition.key().as_str(), "billing.charge");
    assert!(!registered.replaced);

    let fetched = curator.get_capability(None, "billing.charge").await;
    assert!(fetched.is_success());
    assert_eq!(
        fetched.data().map(|definition| definition.realm()),
        Some("payments")
    );

    let removed = curator.unregister_capability(None, "billing.charge").await;
    assert!(removed.is_success());

    let missing = curator.get_capability(None, "billing.charge").await;
    assert_eq!(missing.error_code(), Some("CAPABILITY_NOT_FOUND"));

    let absent = curator.unregister_capability(None, "billing.charge").await;
    assert_eq!(absent.error_code(), Some("CAPABILITY_NOT_FOUND"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn re_registration_replaces_without_duplicating(curator: Curator<DefaultClock>) {
    for description in ["first", "second"] {
        let response = curator
            .register_capability(
                None,
                RegisterCapabilityRequest::new("billing", "refund").with_description(description),
            )
            .await;
        assert!(response.is_success());
    }

    let listed = curator
        .get_capabilities_by_service(None, "billing")
        .await
        .into_data()
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description(), "second");
}

#[rstest]
#[case("billing", "  ")]
#[case("billing.v2", "charge")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_capability_names_are_validation_errors(
    curator: Curator<DefaultClock>,
    #[case] service: &str,
    #[case] capability: &str,
) {
    let response = curator
        .register_capability(None, RegisterCapabilityRequest::new(service, capability))
        .await;

    assert!(!response.is_success());
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test(flavor = "multi_thread")]
async fn caller_without_grant_is_denied_and_counted() {
    let metrics = InMemoryMetricsSink::new();
    let permissions = StaticPermissionChecker::new().with_grant(
        "reader",
        AccessResource::CapabilityRegistry,
        AccessAction::Read,
    );
    let curator = guarded_curator(permissions, StaticTenantValidator::default(), &metrics);
    let reader = CallerContext::new("reader");

    let denied = curator
        .register_capability(Some(&reader), RegisterCapabilityRequest::new("billing", "charge"))
        .await;
    assert_eq!(denied.error_code(), Some("ACCESS_DENIED"));
    assert_eq!(metrics.total("curator_register_capability_access_denied"), 1.0);
    assert_eq!(metrics.total("curator_register_capability_success"), 0.0);

    let listed = curator.list_capabilities(Some(&reader), None).await;
    assert!(listed.is_success());
    assert_eq!(metrics.total("curator_list_capabilities_success"), 1.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_tenant_is_refused_after_permission_check() {
    let metrics = InMemoryMetricsSink::new();
    let permissions = StaticPermissionChecker::new().with_grant(
        "ops",
        AccessResource::RouteRegistry,
        AccessAction::Read,
    );
    let curator = guarded_curator(permissions, StaticTenantValidator::new(["acme"]), &metrics);

    let foreign = CallerContext::new("ops").with_tenant("globex");
    let refused = curator.get_route(Some(&foreign), "r1").await;
    assert_eq!(refused.error_code(), Some("TENANT_ACCESS_DENIED"));
    assert_eq!(metrics.total("curator_get_route_tenant_denied"), 1.0);

    let member = CallerContext::new("ops").with_tenant("acme");
    let missing = curator.get_route(Some(&member), "r1").await;
    assert_eq!(missing.error_code(), Some("ROUTE_NOT_FOUND"));
    assert_eq!(metrics.total("curator_get_route_error"), 1.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn anonymous_calls_bypass_the_permission_port() {
    let metrics = InMemoryMetricsSink::new();
    let curator = guarded_curator(
        StaticPermissionChecker::new(),
        StaticTenantValidator::default(),
        &metrics,
    );

    let response = curator
        .register_capability(None, RegisterCapabilityRequest::new("billing", "charge"))
        .await;

    assert!(response.is_success());
    assert_eq!(metrics.total("curator_register_capability_started"), 1.0);
    assert_eq!(metrics.total("curator_register_capability_success"), 1.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn registrations_are_mirrored_into_the_backend() {
    let backend = InMemoryDiscoveryBackend::new();
    let curator = Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock))
        .with_discovery_backend(Arc::new(backend.clone()));

    let synced = curator
        .register_capability(None, RegisterCapabilityRequest::new("search", "query"))
        .await
        .into_data()
        .expect("registration should succeed");
    assert_eq!(synced.backend_synced, Some(true));
    assert!(backend.service("search.query").is_some());

    backend.set_available(false);
    let unsynced = curator
        .register_capability(None, RegisterCapabilityRequest::new("search", "suggest"))
        .await
        .into_data()
        .expect("registration should succeed while the backend is down");
    assert_eq!(unsynced.backend_synced, Some(false));
    assert!(curator.get_capability(None, "search.suggest").await.is_success());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mesh_policies_fold_in_arrival_order(curator: Curator<DefaultClock>) {
    let empty = curator
        .get_service_mesh_policy_report(None, "checkout")
        .await
        .into_data()
        .expect("aggregate should succeed");
    assert_eq!(empty.source, NO_POLICIES_SOURCE);

    for snapshot in [
        PolicySnapshot::new(json!({"retries": 3, "timeout_ms": 500})).with_source("istio"),
        PolicySnapshot::new(json!({"retries": 5})).with_source("linkerd"),
    ] {
        let reported = curator
            .report_service_mesh_policies(None, "checkout", snapshot)
            .await;
        assert!(reported.is_success());
    }

    let folded = curator
        .get_service_mesh_policy_report(None, "checkout")
        .await
        .into_data()
        .expect("aggregate should succeed");
    assert_eq!(folded.source, AGGREGATED_SOURCE);
    assert_eq!(folded.report_count, 2);
    assert_eq!(folded.policies.get("retries"), Some(&json!(5)));
    assert_eq!(folded.policies.get("timeout_ms"), Some(&json!(500)));
    assert_eq!(folded.sources, vec!["istio".to_owned(), "linkerd".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_capability_usage_is_reported(curator: Curator<DefaultClock>) {
    let registration = AgentCapabilityRegistration::new("agent-1", "Indexer")
        .with_capability(AgentCapabilitySpec::new("index").with_type("data"))
        .with_pillar("knowledge");
    assert!(
        curator
            .register_agent_capabilities(None, registration)
            .await
            .is_success()
    );

    let usage = curator
        .update_capability_usage(None, "index", "agent-1")
        .await
        .into_data()
        .expect("usage update should succeed");
    assert_eq!(usage.total_uses, 1);
    assert_eq!(usage.usage_by_pillar.get("knowledge"), Some(&1));

    let report = curator
        .get_agent_capability_report(None, "agent-1")
        .await
        .into_data()
        .expect("report should exist");
    assert_eq!(report.total_capabilities, 1);

    let removed = curator.unregister_agent_capabilities(None, "agent-1").await;
    assert!(removed.is_success());
    let gone = curator.get_agent_capability_report(None, "agent-1").await;
    assert_eq!(gone.error_code(), Some("AGENT_CAPABILITIES_NOT_FOUND"));
}

#[tokio::test(flavor = "multi_thread")]
async fn catalog_gates_specialization_bindings() {
    let catalog = InMemorySpecializationCatalog::with_entries([CatalogSpecialization::new(
        "code-review",
        "Code Review",
    )
    .with_pillar("engineering")]);
    let curator = Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock))
        .with_specialization_catalog(Arc::new(catalog));

    let loaded = curator.initialize().await.expect("initialization should succeed");
    assert_eq!(loaded, 1);

    let unknown = curator
        .register_agent_specialization(
            None,
            "agent-1",
            "Reviewer",
            SpecializationRequest::new("poetry"),
        )
        .await;
    assert_eq!(unknown.error_code(), Some("SPECIALIZATION_NOT_FOUND"));

    let bound = curator
        .register_agent_specialization(
            None,
            "agent-1",
            "Reviewer",
            SpecializationRequest::new("code-review").with_pillar("engineering"),
        )
        .await;
    assert!(bound.is_success());

    let pillar = curator
        .get_pillar_specializations(None, "engineering")
        .await
        .into_data()
        .expect("pillar lookup should succeed");
    assert_eq!(pillar, vec!["code-review".to_owned()]);

    let members = curator
        .get_agents_by_specialization(None, "code-review")
        .await
        .into_data()
        .expect("member lookup should succeed");
    assert_eq!(members, vec!["agent-1".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn specialization_usage_tracks_success_rate(curator: Curator<DefaultClock>) {
    let missing = curator
        .update_specialization_usage(None, "ghost", true, None)
        .await;
    assert_eq!(missing.error_code(), Some("AGENT_SPECIALIZATION_NOT_FOUND"));

    assert!(
        curator
            .register_agent_specialization(
                None,
                "agent-2",
                "Planner",
                SpecializationRequest::new("planning"),
            )
            .await
            .is_success()
    );
    for success in [true, true, true, false] {
        let updated = curator
            .update_specialization_usage(None, "agent-2", success, Some("schedule"))
            .await;
        assert!(updated.is_success());
    }

    let binding = curator
        .get_agent_specialization(None, "agent-2")
        .await
        .into_data()
        .expect("binding should exist");
    assert_eq!(binding.usage_count, 4);
    assert_eq!(binding.success_rate, 0.75);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn locate_falls_back_to_capability_registry(curator: Curator<DefaultClock>) {
    let unknown = curator.locate_service(None, "ledger").await;
    assert_eq!(unknown.error_code(), Some("SERVICE_NOT_FOUND"));

    assert!(
        curator
            .register_capability(
                None,
                RegisterCapabilityRequest::new("ledger", "post").with_realm("finance"),
            )
            .await
            .is_success()
    );

    let located = curator
        .locate_service(None, "ledger")
        .await
        .into_data()
        .expect("service should be located");
    assert_eq!(located.name, "ledger");
    assert_eq!(located.location, "capability_registry");
    assert_eq!(located.realm, "finance");
}

#[tokio::test(flavor = "multi_thread")]
async fn manifest_services_are_discovered_and_counted() {
    let manifest = ServiceManifest::new([
        ServiceDescriptor::new("inventory", "DomainService", "commerce"),
        ServiceDescriptor::new("shipping", "DomainService", "logistics"),
    ])
    .expect("manifest should be valid");
    let curator = Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock))
        .with_service_manifest(manifest);

    let report = curator
        .discover_all_services(None)
        .await
        .into_data()
        .expect("discovery should succeed");
    assert_eq!(report.discovered.len(), 2);
    assert!(report.failed.is_empty());

    let status = curator
        .status()
        .await
        .into_data()
        .expect("status should be available");
    assert_eq!(status.discovered_services, 2);
    assert_eq!(status.capabilities, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn registered_discoveries_become_directory_services() {
    let manifest = ServiceManifest::new([ServiceDescriptor::new(
        "inventory",
        "DomainService",
        "commerce",
    )])
    .expect("manifest should be valid");
    let curator = Curator::new(CuratorConfig::for_tests(), Arc::new(DefaultClock))
        .with_service_manifest(manifest);

    let registration = curator
        .register_discovered_services(None)
        .await
        .into_data()
        .expect("registration should succeed");
    assert_eq!(registration.registered, vec!["inventory"]);

    let report = curator
        .discover_all_services(None)
        .await
        .into_data()
        .expect("discovery should succeed");
    assert!(report.discovered.is_empty());
    assert_eq!(report.skipped, vec!["inventory"]);

    let located = curator
        .locate_service(None, "inventory")
        .await
        .into_data()
        .expect("service should be located");
    assert_eq!(located.realm, "commerce");
}

#[tokio::test(flavor = "multi_thread")]
async fn initialize_starts_analytics_and_shutdown_stops_it() {
    let curator = Curator::new(CuratorConfig::default(), Arc::new(DefaultClock))
        .with_access_guard(AccessGuard::new(
            Arc::new(AllowAll),
            Arc::new(AllowAll),
            Arc::new(InMemoryMetricsSink::new()),
        ));

    let loaded = curator.initialize().await.expect("initialization should succeed");
    assert_eq!(loaded, 0);
    let running = curator
        .status()
        .await
        .into_data()
        .expect("status should be available");
    assert_eq!(running.running_monitors, 1);

    curator.shutdown().await;
    let stopped = curator
        .status()
        .await
        .into_data()
        .expect("status should be available");
    assert_eq!(stopped.running_monitors, 0);
}
