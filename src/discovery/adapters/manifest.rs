//! Source backed by the startup manifest.

use crate::discovery::{
    domain::{ScanOutcome, ServiceManifest},
    ports::ServiceSource,
};
use async_trait::async_trait;

/// Yields every service declared in a [`ServiceManifest`].
#[derive(Debug, Clone, Default)]
pub struct ManifestSource {
    manifest: ServiceManifest,
}

impl ManifestSource {
    /// Wraps a manifest.
    #[must_use]
    pub const fn new(manifest: ServiceManifest) -> Self {
        Self { manifest }
    }
}

#[async_trait]
impl ServiceSource for ManifestSource {
    fn label(&self) -> &'static str {
        "manifest"
    }

    async fn scan(&self) -> ScanOutcome {
        ScanOutcome {
            found: self
                .manifest
                .services
                .iter()
                .map(|descriptor| descriptor.to_discovered())
                .collect(),
            failed: Vec::new(),
        }
    }
}
