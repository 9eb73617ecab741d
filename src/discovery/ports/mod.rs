//! Port contracts for service discovery.

pub mod directory;
pub mod source;

pub use directory::{ServiceDirectory, ServiceDirectoryError, ServiceDirectoryResult};
pub use source::ServiceSource;

#[cfg(test)]
pub use directory::MockServiceDirectory;
