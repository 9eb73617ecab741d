//! Service-mesh policy reporting for Curator.
//!
//! Domains report the policies they enforce for a service as append-only
//! [`domain::PolicyReport`]s. The aggregate view folds every report for a
//! service in arrival order, later values winning per policy key.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
