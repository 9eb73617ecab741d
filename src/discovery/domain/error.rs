//! Discovery domain errors.

use thiserror::Error;

/// Validation failures for discovery inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryDomainError {
    /// A manifest descriptor had a blank name.
    #[error("service descriptor name must not be empty")]
    EmptyServiceName,

    /// A discovery pattern named no base trait.
    #[error("discovery pattern for {directory} has no expected base")]
    EmptyExpectedBase {
        /// Directory the pattern scans.
        directory: String,
    },

    /// A filename glob could not be compiled.
    #[error("invalid filename glob {glob}: {reason}")]
    InvalidGlob {
        /// Offending glob.
        glob: String,
        /// Compiler message.
        reason: String,
    },

    /// The manifest document could not be parsed.
    #[error("invalid service manifest: {0}")]
    InvalidManifest(String),
}
