//! Ordered lookup over service providers.

use crate::discovery::domain::DiscoveredService;
use async_trait::async_trait;
use std::sync::Arc;

/// One tier of a [`ProviderChain`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// Tier label reported with a hit.
    fn tier(&self) -> &'static str;

    /// Returns the named service if this tier knows it.
    async fn provide(&self, name: &str) -> Option<DiscoveredService>;
}

/// A service found by [`ProviderChain::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedService {
    /// Tier that answered.
    pub tier: &'static str,
    /// The service.
    pub service: DiscoveredService,
}

/// Providers consulted in order until one answers.
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn ServiceProvider>>,
}

impl ProviderChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider after those already present.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn ServiceProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Asks each provider in turn, stopping at the first hit.
    pub async fn locate(&self, name: &str) -> Option<LocatedService> {
        for provider in &self.providers {
            if let Some(service) = provider.provide(name).await {
                return Some(LocatedService {
                    tier: provider.tier(),
                    service,
                });
            }
        }
        None
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tiers: Vec<&str> = self.providers.iter().map(|provider| provider.tier()).collect();
        f.debug_struct("ProviderChain").field("tiers", &tiers).finish()
    }
}
