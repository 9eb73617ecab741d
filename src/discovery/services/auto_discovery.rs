//! Service auto-discovery orchestration.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::provider::{LocatedService, ProviderChain, ServiceProvider};
use crate::discovery::{
    adapters::{FilesystemScanner, ManifestSource},
    domain::{
        DiscoveredService, DiscoveryPattern, DiscoveryReport, RegistrationFailure,
        RegistrationReport, ServiceManifest,
    },
    ports::{ServiceDirectory, ServiceDirectoryError, ServiceSource},
};

/// Errors returned by [`AutoDiscoveryService`].
#[derive(Debug, Clone, Error)]
pub enum AutoDiscoveryError {
    /// The service directory failed.
    #[error(transparent)]
    Directory(#[from] ServiceDirectoryError),

    /// Shared state lock was poisoned.
    #[error("auto-discovery state lock poisoned: {0}")]
    StatePoisoned(String),
}

/// Result type for auto-discovery operations.
pub type AutoDiscoveryResult<T> = Result<T, AutoDiscoveryError>;

type DiscoveredMap = BTreeMap<String, DiscoveredService>;

fn poisoned(err: impl std::fmt::Display) -> AutoDiscoveryError {
    AutoDiscoveryError::StatePoisoned(err.to_string())
}

/// Learns services from the manifest and the filesystem, and locates them
/// through a [`ProviderChain`].
#[derive(Clone)]
pub struct AutoDiscoveryService {
    directory: Arc<dyn ServiceDirectory>,
    manifest: ServiceManifest,
    scanner: FilesystemScanner,
    discovered: Arc<RwLock<DiscoveredMap>>,
    fallbacks: Vec<Arc<dyn ServiceProvider>>,
}

impl AutoDiscoveryService {
    /// Creates a service with an empty manifest and no scan patterns.
    #[must_use]
    pub fn new(directory: Arc<dyn ServiceDirectory>) -> Self {
        Self {
            directory,
            manifest: ServiceManifest::default(),
            scanner: FilesystemScanner::default(),
            discovered: Arc::new(RwLock::new(BTreeMap::new())),
            fallbacks: Vec::new(),
        }
    }

    /// Replaces the service directory.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn ServiceDirectory>) -> Self {
        self.directory = directory;
        self
    }

    /// Sets the registration manifest.
    #[must_use]
    pub fn with_manifest(mut self, manifest: ServiceManifest) -> Self {
        self.manifest = manifest;
        self
    }

    /// Sets the filesystem scan patterns.
    #[must_use]
    pub fn with_patterns(mut self, patterns: impl IntoIterator<Item = DiscoveryPattern>) -> Self {
        self.scanner = FilesystemScanner::new(patterns);
        self
    }

    /// Appends a lookup tier consulted after the built-in ones.
    #[must_use]
    pub fn with_fallback(mut self, provider: Arc<dyn ServiceProvider>) -> Self {
        self.fallbacks.push(provider);
        self
    }

    /// Scans the manifest then the filesystem.
    ///
    /// Services already in the directory are skipped. When two sources name
    /// the same service the first one wins. Results are merged into the
    /// discovered set; [`Self::register_discovered_services`] hands them to
    /// the directory.
    ///
    /// # Errors
    ///
    /// Returns [`AutoDiscoveryError`] when the directory cannot be queried.
    pub async fn discover_all_services(&self) -> AutoDiscoveryResult<DiscoveryReport> {
        let manifest = ManifestSource::new(self.manifest.clone());
        let sources: [&dyn ServiceSource; 2] = [&manifest, &self.scanner];
        let mut report = DiscoveryReport::default();

        for source in sources {
            let outcome = source.scan().await;
            debug!(
                source = source.label(),
                found = outcome.found.len(),
                failed = outcome.failed.len(),
                "discovery source scanned"
            );
            for failure in &outcome.failed {
                warn!(
                    source = source.label(),
                    location = %failure.location,
                    reason = %failure.reason,
                    "discovery location unreadable"
                );
            }
            report.failed.extend(outcome.failed);

            for service in outcome.found {
                if report.discovered.contains_key(&service.name)
                    || report.skipped.contains(&service.name)
                {
                    continue;
                }
                if self.directory.lookup(&service.name).await?.is_some() {
                    report.skipped.push(service.name);
                } else {
                    report.discovered.insert(service.name.clone(), service);
                }
            }
        }

        {
            let mut discovered = self.discovered.write().map_err(poisoned)?;
            for (name, service) in &report.discovered {
                discovered.insert(name.clone(), service.clone());
            }
        }

        info!(
            discovered = report.discovered.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "service discovery completed"
        );
        Ok(report)
    }

    /// Registers every service in `report.discovered` with the directory.
    ///
    /// A rejected service is recorded and the pass continues. Registered
    /// services are reported as skipped by later discovery passes.
    pub async fn register_discovered_services(
        &self,
        report: &DiscoveryReport,
    ) -> RegistrationReport {
        let mut outcome = RegistrationReport::default();
        for service in report.discovered.values() {
            match self.directory.register(service.clone()).await {
                Ok(()) => outcome.registered.push(service.name.clone()),
                Err(err) => {
                    warn!(
                        service = %service.name,
                        error = %err,
                        "discovered service not registered"
                    );
                    outcome.failed.push(RegistrationFailure {
                        service: service.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        info!(
            registered = outcome.registered.len(),
            failed = outcome.failed.len(),
            "discovered services registered"
        );
        outcome
    }

    /// Looks a service up across the directory, the discovered set, the
    /// manifest, a filesystem rescan, then any fallbacks.
    pub async fn locate(&self, name: &str) -> Option<LocatedService> {
        let chain = self.fallbacks.iter().fold(
            ProviderChain::new()
                .with_provider(Arc::new(DirectoryTier(Arc::clone(&self.directory))))
                .with_provider(Arc::new(DiscoveredTier(Arc::clone(&self.discovered))))
                .with_provider(Arc::new(ManifestTier(self.manifest.clone())))
                .with_provider(Arc::new(ScanTier(self.scanner.clone()))),
            |chain, provider| chain.with_provider(Arc::clone(provider)),
        );
        chain.locate(name.trim()).await
    }

    /// Number of services in the discovered set.
    ///
    /// # Errors
    ///
    /// Returns [`AutoDiscoveryError::StatePoisoned`] when the lock is poisoned.
    pub fn discovered_count(&self) -> AutoDiscoveryResult<usize> {
        Ok(self.discovered.read().map_err(poisoned)?.len())
    }
}

impl std::fmt::Debug for AutoDiscoveryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDiscoveryService")
            .field("manifest", &self.manifest)
            .field("scanner", &self.scanner)
            .field("fallbacks", &self.fallbacks.len())
            .finish_non_exhaustive()
    }
}

struct DirectoryTier(Arc<dyn ServiceDirectory>);

#[async_trait]
impl ServiceProvider for DirectoryTier {
    fn tier(&self) -> &'static str {
        "directory"
    }

    async fn provide(&self, name: &str) -> Option<DiscoveredService> {
        match self.0.lookup(name).await {
            Ok(found) => found,
            Err(err) => {
                warn!(service = name, error = %err, "service directory lookup failed");
                None
            }
        }
    }
}

struct DiscoveredTier(Arc<RwLock<DiscoveredMap>>);

#[async_trait]
impl ServiceProvider for DiscoveredTier {
    fn tier(&self) -> &'static str {
        "discovered"
    }

    async fn provide(&self, name: &str) -> Option<DiscoveredService> {
        self.0
            .read()
            .ok()
            .and_then(|discovered| discovered.get(name).cloned())
    }
}

struct ManifestTier(ServiceManifest);

#[async_trait]
impl ServiceProvider for ManifestTier {
    fn tier(&self) -> &'static str {
        "manifest"
    }

    async fn provide(&self, name: &str) -> Option<DiscoveredService> {
        self.0.find(name).map(|descriptor| descriptor.to_discovered())
    }
}

struct ScanTier(FilesystemScanner);

#[async_trait]
impl ServiceProvider for ScanTier {
    fn tier(&self) -> &'static str {
        "filesystem"
    }

    async fn provide(&self, name: &str) -> Option<DiscoveredService> {
        if self.0.pattern_count() == 0 {
            return None;
        }
        self.0
            .scan()
            .await
            .found
            .into_iter()
            .find(|service| service.name == name)
    }
}
