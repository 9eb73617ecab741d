//! Service protocol registry for Curator.
//!
//! A protocol names the methods a service answers, with input and output
//! schemas for each. Protocols are keyed by `(service_name, protocol_name)`
//! and re-registering a pair replaces it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
