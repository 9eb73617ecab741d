//! Adapter implementations for discovery ports.

mod filesystem;
mod manifest;
pub mod memory;

pub use filesystem::FilesystemScanner;
pub use manifest::ManifestSource;
