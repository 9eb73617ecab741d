//! Port contracts for policy report persistence.

pub mod repository;

pub use repository::{
    PolicyReportRepository, PolicyReportRepositoryError, PolicyReportRepositoryResult,
};
