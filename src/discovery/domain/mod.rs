//! Domain model for service discovery.

mod error;
mod manifest;
mod pattern;
mod report;

pub use error::DiscoveryDomainError;
pub use manifest::{ServiceDescriptor, ServiceManifest};
pub use pattern::DiscoveryPattern;
pub use report::{
    DiscoveredService, DiscoveryFailure, DiscoveryReport, RegistrationFailure, RegistrationReport,
    ScanOutcome,
};
