//! Auto-discovery orchestration tests over scratch source trees.

use std::sync::Arc;

use crate::discovery::{
    adapters::memory::InMemoryServiceDirectory,
    domain::{DiscoveredService, DiscoveryPattern, ServiceDescriptor, ServiceManifest},
    ports::{MockServiceDirectory, ServiceDirectory, ServiceDirectoryError},
    services::{AutoDiscoveryError, AutoDiscoveryService, MockServiceProvider, ProviderChain},
};
use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct SourceTree {
    _scratch: TempDir,
    root: Utf8PathBuf,
}

impl SourceTree {
    fn services_dir(&self) -> Utf8PathBuf {
        self.root.join("services")
    }

    fn pattern(&self, realm: &str) -> DiscoveryPattern {
        DiscoveryPattern::new(self.services_dir(), "*_service.rs", "RealmService", realm)
            .expect("pattern should compile")
    }
}

#[fixture]
fn tree() -> SourceTree {
    let scratch = tempfile::tempdir().expect("scratch directory should be created");
    let root = Utf8PathBuf::from_path_buf(scratch.path().to_path_buf())
        .expect("scratch path should be UTF-8");
    let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("root should open");
    dir.create_dir("services").expect("services dir should be created");
    dir.write(
        "services/billing_service.rs",
        "pub struct BillingService;\nimpl RealmService for BillingService {}\n",
    )
    .expect("billing source should be written");
    dir.write(
        "services/ledger_service.rs",
        "pub struct LedgerService;\nimpl RealmService for LedgerService {}\n",
    )
    .expect("ledger source should be written");
    dir.write(
        "services/notes.md",
        "struct NotesService;\nimpl RealmService for NotesService {}\n",
    )
    .expect("notes should be written");
    dir.create_dir("services/nested_service.rs")
        .expect("directory named like a source file should be created");
    SourceTree {
        _scratch: scratch,
        root,
    }
}

fn manifest() -> ServiceManifest {
    ServiceManifest::new([ServiceDescriptor::new(
        "BillingService",
        "RealmService",
        "finance",
    )])
    .expect("manifest should be valid")
}

fn discovery(directory: &InMemoryServiceDirectory) -> AutoDiscoveryService {
    AutoDiscoveryService::new(Arc::new(directory.clone()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manifest_entries_win_over_scanned_duplicates(tree: SourceTree) {
    let service = discovery(&InMemoryServiceDirectory::new())
        .with_manifest(manifest())
        .with_patterns([tree.pattern("ops")]);

    let report = service
        .discover_all_services()
        .await
        .expect("discovery should succeed");

    let billing = report
        .discovered
        .get("BillingService")
        .expect("billing should be discovered");
    assert_eq!(billing.location, "manifest");
    assert_eq!(billing.realm, "finance");
    let ledger = report
        .discovered
        .get("LedgerService")
        .expect("ledger should be discovered");
    assert_eq!(ledger.realm, "ops");
    assert_eq!(ledger.kind, "RealmService");
    assert_eq!(
        ledger.location,
        tree.services_dir().join("ledger_service.rs").as_str()
    );
    assert_eq!(report.discovered.len(), 2);
    assert!(report.skipped.is_empty());
    assert!(report.failed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn services_in_the_directory_are_skipped(tree: SourceTree) {
    let directory = InMemoryServiceDirectory::new();
    directory
        .register(DiscoveredService {
            name: "LedgerService".to_owned(),
            location: "container".to_owned(),
            kind: "RealmService".to_owned(),
            realm: "ops".to_owned(),
        })
        .await
        .expect("registration should succeed");
    let service = discovery(&directory).with_patterns([tree.pattern("ops")]);

    let report = service
        .discover_all_services()
        .await
        .expect("discovery should succeed");

    assert_eq!(report.skipped, vec!["LedgerService".to_owned()]);
    assert!(report.discovered.contains_key("BillingService"));
    assert!(!report.discovered.contains_key("LedgerService"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_directories_are_reported_without_aborting(tree: SourceTree) {
    let missing = DiscoveryPattern::new(tree.root.join("absent"), "*.rs", "RealmService", "ops")
        .expect("pattern should compile");
    let service = discovery(&InMemoryServiceDirectory::new())
        .with_patterns([missing, tree.pattern("ops")]);

    let report = service
        .discover_all_services()
        .await
        .expect("discovery should succeed");

    assert_eq!(report.failed.len(), 1);
    let failure = report.failed.first().expect("failure should be recorded");
    assert_eq!(failure.location, tree.root.join("absent").as_str());
    assert!(!failure.reason.is_empty());
    assert_eq!(report.discovered.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_is_idempotent(tree: SourceTree) {
    let directory = InMemoryServiceDirectory::new();
    let service = discovery(&directory)
        .with_manifest(manifest())
        .with_patterns([tree.pattern("ops")]);

    let first = service
        .discover_all_services()
        .await
        .expect("first pass should succeed");
    let second = service
        .discover_all_services()
        .await
        .expect("second pass should succeed");

    assert_eq!(first, second);
    assert_eq!(service.discovered_count().expect("count should succeed"), 2);
    assert!(
        directory
            .lookup("BillingService")
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_services_are_skipped_on_the_next_pass(tree: SourceTree) {
    let directory = InMemoryServiceDirectory::new();
    let service = discovery(&directory)
        .with_manifest(manifest())
        .with_patterns([tree.pattern("ops")]);

    let first = service
        .discover_all_services()
        .await
        .expect("first pass should succeed");
    let registration = service.register_discovered_services(&first).await;
    assert_eq!(registration.registered, vec!["BillingService", "LedgerService"]);
    assert!(registration.failed.is_empty());

    let billing = directory
        .lookup("BillingService")
        .await
        .expect("lookup should succeed")
        .expect("billing should be in the directory");
    assert_eq!(billing.realm, "finance");

    let second = service
        .discover_all_services()
        .await
        .expect("second pass should succeed");
    assert!(second.discovered.is_empty());
    assert_eq!(second.skipped, vec!["BillingService", "LedgerService"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_registrations_are_reported_per_service() {
    let mut directory = MockServiceDirectory::new();
    directory.expect_lookup().returning(|_| Ok(None));
    directory.expect_register().returning(|_| {
        Err(ServiceDirectoryError::unavailable(std::io::Error::other(
            "container read-only",
        )))
    });
    let service = AutoDiscoveryService::new(Arc::new(directory)).with_manifest(manifest());
    let report = service
        .discover_all_services()
        .await
        .expect("discovery should succeed");

    let registration = service.register_discovered_services(&report).await;

    assert!(registration.registered.is_empty());
    let [failure] = registration.failed.as_slice() else {
        panic!("expected one failure, got {:?}", registration.failed);
    };
    assert_eq!(failure.service, "BillingService");
    assert!(failure.reason.contains("container read-only"));
}

#[tokio::test(flavor = "multi_thread")]
async fn directory_failure_aborts_discovery() {
    let mut directory = MockServiceDirectory::new();
    directory.expect_lookup().returning(|_| {
        Err(ServiceDirectoryError::unavailable(std::io::Error::other(
            "container offline",
        )))
    });
    let service = AutoDiscoveryService::new(Arc::new(directory)).with_manifest(manifest());

    let result = service.discover_all_services().await;

    assert!(matches!(result, Err(AutoDiscoveryError::Directory(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn locate_walks_tiers_in_order(tree: SourceTree) {
    let directory = InMemoryServiceDirectory::new();
    directory
        .register(DiscoveredService {
            name: "BillingService".to_owned(),
            location: "container".to_owned(),
            kind: "RealmService".to_owned(),
            realm: "finance".to_owned(),
        })
        .await
        .expect("registration should succeed");
    let service = discovery(&directory)
        .with_manifest(
            ServiceManifest::new([ServiceDescriptor::new("ReportService", "RealmService", "bi")])
                .expect("manifest should be valid"),
        )
        .with_patterns([tree.pattern("ops")]);

    let billing = service.locate("BillingService").await.expect("billing should be located");
    assert_eq!(billing.tier, "directory");
    let report = service.locate("ReportService").await.expect("report should be located");
    assert_eq!(report.tier, "manifest");
    let ledger = service.locate("LedgerService").await.expect("ledger should be located");
    assert_eq!(ledger.tier, "filesystem");

    service
        .discover_all_services()
        .await
        .expect("discovery should succeed");
    let cached = service.locate("LedgerService").await.expect("ledger should be located");
    assert_eq!(cached.tier, "discovered");
    assert!(service.locate("NotesService").await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn fallbacks_answer_after_builtin_tiers() {
    let mut fallback = MockServiceProvider::new();
    fallback.expect_tier().return_const("capability_registry");
    fallback.expect_provide().returning(|name| {
        (name == "PricingService").then(|| DiscoveredService {
            name: name.to_owned(),
            location: "capability_registry".to_owned(),
            kind: "capability".to_owned(),
            realm: "sales".to_owned(),
        })
    });
    let service =
        discovery(&InMemoryServiceDirectory::new()).with_fallback(Arc::new(fallback));

    let located = service
        .locate("PricingService")
        .await
        .expect("fallback should answer");

    assert_eq!(located.tier, "capability_registry");
    assert_eq!(located.service.realm, "sales");
}

#[tokio::test(flavor = "multi_thread")]
async fn chain_stops_at_first_hit() {
    let mut primary = MockServiceProvider::new();
    primary.expect_tier().return_const("primary");
    primary.expect_provide().times(1).returning(|name| {
        Some(DiscoveredService {
            name: name.to_owned(),
            location: "primary".to_owned(),
            kind: "RealmService".to_owned(),
            realm: "core".to_owned(),
        })
    });
    let mut secondary = MockServiceProvider::new();
    secondary.expect_provide().never();
    let chain = ProviderChain::new()
        .with_provider(Arc::new(primary))
        .with_provider(Arc::new(secondary));

    let located = chain.locate("AnyService").await.expect("primary should answer");

    assert_eq!(chain.len(), 2);
    assert_eq!(located.tier, "primary");
    assert_eq!(located.service.location, "primary");
}
