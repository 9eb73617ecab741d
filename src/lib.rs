//! Curator: registry and discovery core for services and agents.
//!
//! This crate keeps track of what services can do and how agents are doing.
//! Services publish capabilities, protocols, routes, and service-mesh policy
//! reports; agents register capability lists and specializations and are
//! health-monitored in the background. A best-effort auto-discovery service
//! finds services declared in a manifest or by naming convention in source
//! trees.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, probes, and backends
//! - **Adapters**: Concrete implementations of ports (in-memory stores, etc.)
//! - **Services**: Orchestration over ports, owning shared state and monitors
//!
//! The [`curator::Curator`] facade fronts every service with access checks,
//! metrics, and a uniform [`curator::CuratorResponse`].
//!
//! # Modules
//!
//! - [`capability`]: Capability definitions and the discovery backend bridge
//! - [`protocol`]: Service protocol registry
//! - [`route`]: Route registry with secondary indexes
//! - [`mesh_policy`]: Service-mesh policy reports and their aggregate
//! - [`agent_capability`]: Agent capability lists, usage, and monitoring
//! - [`agent_health`]: Agent health monitoring, alerts, and trends
//! - [`specialization`]: Agent specialization bindings and analytics
//! - [`discovery`]: Service auto-discovery
//! - [`monitor`]: Supervision of background tasks
//! - [`access`]: Caller permissions, tenants, and operation metrics
//! - [`config`]: Runtime configuration
//! - [`error`]: Facade error taxonomy

pub mod access;
pub mod agent_capability;
pub mod agent_health;
pub mod capability;
pub mod config;
pub mod curator;
pub mod discovery;
pub mod error;
pub mod mesh_policy;
pub mod monitor;
pub mod protocol;
pub mod route;
pub mod specialization;

mod numeric;
