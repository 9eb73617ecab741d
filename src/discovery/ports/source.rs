//! Origin of discoverable services.

use crate::discovery::domain::ScanOutcome;
use async_trait::async_trait;

/// Produces candidate services; failures are reported, never raised.
#[async_trait]
pub trait ServiceSource: Send + Sync {
    /// Short label used in logs.
    fn label(&self) -> &'static str;

    /// Scans for services.
    async fn scan(&self) -> ScanOutcome;
}
