//! Directory of services already wired into the running process.

use crate::discovery::domain::DiscoveredService;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for service directory operations.
pub type ServiceDirectoryResult<T> = Result<T, ServiceDirectoryError>;

/// Services already registered with the dependency container.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Finds a registered service by name.
    async fn lookup(&self, name: &str) -> ServiceDirectoryResult<Option<DiscoveredService>>;

    /// Registers a service, replacing any entry with the same name.
    async fn register(&self, service: DiscoveredService) -> ServiceDirectoryResult<()>;
}

/// Errors returned by service directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ServiceDirectoryError {
    /// The directory could not be read or written.
    #[error("service directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceDirectoryError {
    /// Wraps an underlying failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
