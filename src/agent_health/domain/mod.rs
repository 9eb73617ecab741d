//! Domain model for agent health.

mod alert;
mod error;
mod history;
mod metrics;
mod observation;
mod report;
mod status;
mod summary;
mod thresholds;
mod trend;

pub use alert::{AlertLog, AlertSeverity, AlertType, HealthAlert};
pub use error::{HealthDomainError, ParseHealthStatusError};
pub use history::{HealthHistory, HealthHistoryEntry};
pub use metrics::AgentHealthMetrics;
pub use observation::{HealthObservation, PerformanceMetrics, ResourceUsage};
pub use report::AgentHealthReport;
pub use status::{ComponentStatus, HealthStatus};
pub use summary::{AlertTotals, AverageMetrics, HealthDistribution, HealthSummary};
pub use thresholds::HealthThresholds;
pub use trend::{HealthTrends, TrendDirection, regression_slope};
