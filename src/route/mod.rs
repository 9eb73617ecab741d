//! Route registry for Curator.
//!
//! Routes are indexed by pillar, realm, and owning service so callers can
//! discover them by any combination of the three. Discovery intersects the
//! requested index buckets and returns routes ordered by id, which makes the
//! result independent of the order in which filters are applied.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
