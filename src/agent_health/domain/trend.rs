//! Trend analysis over recent history.

use super::HealthHistory;
use crate::numeric::count_to_f64;
use serde::{Deserialize, Serialize};

const FLAT_SLOPE: f64 = 1e-9;

/// Direction of a metric over the analysed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Moving in the desirable direction.
    Improving,
    /// Moving in the undesirable direction.
    Degrading,
    /// No meaningful movement.
    Stable,
}

/// Trend verdict for an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trend", rename_all = "snake_case")]
pub enum HealthTrends {
    /// Fewer than two samples are available.
    InsufficientData,
    /// Trends over the newest samples.
    Analysed {
        /// Response time direction; falling is improving.
        response_time_trend: TrendDirection,
        /// Success rate direction; rising is improving.
        success_rate_trend: TrendDirection,
        /// Improving or degrading only when both agree.
        overall_trend: TrendDirection,
        /// Number of samples analysed.
        data_points: usize,
    },
}

/// Least-squares slope of `values` against their indices.
///
/// Returns zero for fewer than two values.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "linear regression is floating-point arithmetic"
)]
pub fn regression_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = count_to_f64(values.len());
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (index, value) in values.iter().enumerate() {
        let x = count_to_f64(index);
        sum_x += x;
        sum_y += value;
        sum_xy += x * value;
        sum_x2 += x * x;
    }
    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() <= f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

fn direction(slope: f64, rising_is_better: bool) -> TrendDirection {
    if slope.abs() <= FLAT_SLOPE {
        TrendDirection::Stable
    } else if (slope > 0.0) == rising_is_better {
        TrendDirection::Improving
    } else {
        TrendDirection::Degrading
    }
}

impl HealthTrends {
    /// Analyses the newest `window` samples of `history`.
    #[must_use]
    pub fn analyse(history: &HealthHistory, window: usize) -> Self {
        let recent = history.latest(window);
        if recent.len() < 2 {
            return Self::InsufficientData;
        }
        let response_times: Vec<f64> = recent.iter().map(|entry| entry.response_time_ms).collect();
        let success_rates: Vec<f64> = recent.iter().map(|entry| entry.success_rate).collect();

        let response_time_trend = direction(regression_slope(&response_times), false);
        let success_rate_trend = direction(regression_slope(&success_rates), true);
        let overall_trend = if response_time_trend == success_rate_trend {
            response_time_trend
        } else {
            TrendDirection::Stable
        };

        Self::Analysed {
            response_time_trend,
            success_rate_trend,
            overall_trend,
            data_points: recent.len(),
        }
    }
}
