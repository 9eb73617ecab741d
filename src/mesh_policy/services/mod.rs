//! Orchestration services for policy reporting.

mod reporter;

pub use reporter::{
    ServiceMeshPolicyReporter, ServiceMeshPolicyReporterError, ServiceMeshPolicyReporterResult,
};
