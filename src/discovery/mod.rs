//! Service auto-discovery for Curator.
//!
//! Services are learned from an ordered list of [`ports::ServiceSource`]s: an
//! explicit [`domain::ServiceManifest`] declared at startup first, then a
//! best-effort filesystem scan driven by [`domain::DiscoveryPattern`]s.
//! Services the [`ports::ServiceDirectory`] already holds are skipped, and
//! unreadable locations are reported without aborting discovery.
//!
//! Lookups go through a [`services::ProviderChain`], an ordered list of
//! tiers consulted until one answers.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
