//! In-memory policy report adapters.

mod repository;

pub use repository::InMemoryPolicyReportRepository;
