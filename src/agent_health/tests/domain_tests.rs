//! Classification, alerting, history, and trend tests.

use crate::agent_health::domain::{
    AgentHealthMetrics, AgentHealthReport, AlertLog, AlertSeverity, AlertType, ComponentStatus,
    HealthAlert, HealthHistory, HealthHistoryEntry, HealthObservation, HealthStatus,
    HealthSummary, HealthThresholds, HealthTrends, TrendDirection, regression_slope,
};
use chrono::Utc;
use rstest::{fixture, rstest};

#[fixture]
fn thresholds() -> HealthThresholds {
    HealthThresholds::default()
}

fn metrics_from(observation: HealthObservation, thresholds: &HealthThresholds) -> AgentHealthMetrics {
    let status = thresholds.classify(&observation);
    let mut metrics = AgentHealthMetrics::unknown("agent-1", "Agent One");
    metrics.apply(observation, status, Utc::now());
    metrics
}

#[rstest]
#[case(HealthObservation::new(5_000.0, 0.95, 0.05, 0.99), HealthStatus::Healthy)]
#[case(HealthObservation::new(5_000.1, 1.0, 0.0, 1.0), HealthStatus::Degraded)]
#[case(HealthObservation::new(100.0, 1.0, 0.0, 0.98), HealthStatus::Degraded)]
#[case(HealthObservation::new(100.0, 0.94, 0.0, 1.0), HealthStatus::Unhealthy)]
#[case(HealthObservation::new(100.0, 1.0, 0.06, 1.0), HealthStatus::Unhealthy)]
#[case(HealthObservation::new(9_000.0, 0.5, 0.0, 0.5), HealthStatus::Unhealthy)]
fn classification_honours_threshold_boundaries(
    thresholds: HealthThresholds,
    #[case] observation: HealthObservation,
    #[case] expected: HealthStatus,
) {
    assert_eq!(thresholds.classify(&observation), expected);
}

#[rstest]
#[case(-1.0, 1.0, 0.0, 1.0, "response_time_ms")]
#[case(10.0, 1.5, 0.0, 1.0, "success_rate")]
#[case(10.0, 1.0, -0.1, 1.0, "error_rate")]
#[case(10.0, 1.0, 0.0, f64::NAN, "availability")]
fn out_of_range_observations_are_rejected(
    #[case] response_time_ms: f64,
    #[case] success_rate: f64,
    #[case] error_rate: f64,
    #[case] availability: f64,
    #[case] field: &str,
) {
    let observation =
        HealthObservation::new(response_time_ms, success_rate, error_rate, availability);
    let error = observation
        .validate()
        .expect_err("observation should be rejected");
    assert!(error.to_string().contains(field));
}

#[rstest]
fn evaluate_raises_one_alert_per_violation(thresholds: HealthThresholds) {
    let metrics = metrics_from(
        HealthObservation::new(6_000.0, 0.9, 0.1, 0.9)
            .with_capability("search", ComponentStatus::Degraded)
            .with_dependency("db", ComponentStatus::Degraded)
            .with_dependency("cache", ComponentStatus::Healthy),
        &thresholds,
    );

    let alerts = HealthAlert::evaluate(&metrics, &thresholds, Utc::now());
    let kinds: Vec<(AlertType, AlertSeverity)> = alerts
        .iter()
        .map(|alert| (alert.alert_type, alert.severity))
        .collect();

    assert_eq!(
        kinds,
        vec![
            (AlertType::Performance, AlertSeverity::Warning),
            (AlertType::Reliability, AlertSeverity::Critical),
            (AlertType::Reliability, AlertSeverity::Critical),
            (AlertType::Availability, AlertSeverity::Warning),
            (AlertType::Capability, AlertSeverity::Warning),
            (AlertType::Dependency, AlertSeverity::Warning),
        ]
    );
    assert_eq!(
        alerts.first().map(|alert| alert.message.as_str()),
        Some("High response time: 6000.0ms")
    );
    assert_eq!(
        alerts.get(1).map(|alert| alert.message.as_str()),
        Some("Low success rate: 90.00%")
    );
}

fn alert(message: &str) -> HealthAlert {
    HealthAlert {
        alert_type: AlertType::Performance,
        severity: AlertSeverity::Warning,
        message: message.to_owned(),
        timestamp: Utc::now(),
    }
}

#[rstest]
fn alert_log_suppresses_duplicates_within_window() {
    let mut log = AlertLog::new(100, 5);
    assert!(log.push(alert("slow")));
    assert!(!log.push(alert("slow")));
    assert_eq!(log.len(), 1);
}

#[rstest]
fn alert_log_accepts_repeat_once_outside_window() {
    let mut log = AlertLog::new(100, 5);
    assert!(log.push(alert("slow")));
    for message in ["a", "b", "c", "d", "e"] {
        assert!(log.push(alert(message)));
    }
    assert!(log.push(alert("slow")));
    assert_eq!(log.len(), 7);
}

#[rstest]
fn alert_log_evicts_oldest_when_full() {
    let mut log = AlertLog::new(3, 1);
    for message in ["a", "b", "c", "d"] {
        log.push(alert(message));
    }
    let messages: Vec<String> = log.recent(10).into_iter().map(|stored| stored.message).collect();
    assert_eq!(messages, vec!["b", "c", "d"]);
}

fn entry(response_time_ms: f64, success_rate: f64) -> HealthHistoryEntry {
    let mut metrics = AgentHealthMetrics::unknown("agent-1", "Agent One");
    metrics.response_time_ms = response_time_ms;
    metrics.success_rate = success_rate;
    HealthHistoryEntry::capture(&metrics, Utc::now())
}

#[rstest]
fn history_keeps_newest_entries_in_order() {
    let mut history = HealthHistory::new(100);
    for index in 0..150_u32 {
        history.push(entry(f64::from(index), 1.0));
    }

    let entries = history.entries();
    assert_eq!(entries.len(), 100);
    assert_eq!(entries.first().map(|e| e.response_time_ms), Some(50.0));
    assert_eq!(entries.last().map(|e| e.response_time_ms), Some(149.0));
}

#[rstest]
#[case(&[], 0.0)]
#[case(&[3.0], 0.0)]
#[case(&[1.0, 2.0, 3.0, 4.0], 1.0)]
#[case(&[10.0, 8.0, 6.0], -2.0)]
#[case(&[5.0, 5.0, 5.0], 0.0)]
fn regression_slope_fits_least_squares(#[case] values: &[f64], #[case] expected: f64) {
    assert!((regression_slope(values) - expected).abs() < 1e-9);
}

#[rstest]
fn trends_need_two_samples() {
    let mut history = HealthHistory::new(10);
    history.push(entry(100.0, 1.0));
    assert_eq!(HealthTrends::analyse(&history, 10), HealthTrends::InsufficientData);
}

#[rstest]
fn falling_response_time_and_rising_success_improve() {
    let mut history = HealthHistory::new(100);
    for (response_time_ms, success_rate) in [(300.0, 0.90), (200.0, 0.93), (100.0, 0.96)] {
        history.push(entry(response_time_ms, success_rate));
    }

    assert_eq!(
        HealthTrends::analyse(&history, 10),
        HealthTrends::Analysed {
            response_time_trend: TrendDirection::Improving,
            success_rate_trend: TrendDirection::Improving,
            overall_trend: TrendDirection::Improving,
            data_points: 3,
        }
    );
}

#[rstest]
fn disagreeing_trends_are_stable_overall() {
    let mut history = HealthHistory::new(100);
    for (response_time_ms, success_rate) in [(100.0, 0.90), (200.0, 0.93), (300.0, 0.96)] {
        history.push(entry(response_time_ms, success_rate));
    }

    let HealthTrends::Analysed {
        response_time_trend,
        success_rate_trend,
        overall_trend,
        ..
    } = HealthTrends::analyse(&history, 10)
    else {
        panic!("three samples should be analysed");
    };
    assert_eq!(response_time_trend, TrendDirection::Degrading);
    assert_eq!(success_rate_trend, TrendDirection::Improving);
    assert_eq!(overall_trend, TrendDirection::Stable);
}

#[rstest]
fn report_scores_a_perfect_agent_fully(thresholds: HealthThresholds) {
    let metrics = metrics_from(HealthObservation::new(0.0, 1.0, 0.0, 1.0), &thresholds);
    let report = AgentHealthReport::build(&metrics, &thresholds, HealthTrends::InsufficientData);

    assert_eq!(report.health_status, HealthStatus::Healthy);
    assert!((report.performance_score - 100.0).abs() < 1e-9);
    assert!((report.reliability_score - 100.0).abs() < 1e-9);
    assert!((report.availability_score - 100.0).abs() < 1e-9);
    assert!(report.recommendations.is_empty());
    assert!(report.critical_issues.is_empty());
}

#[rstest]
fn report_advises_on_each_violation(thresholds: HealthThresholds) {
    let metrics = metrics_from(
        HealthObservation::new(12_000.0, 0.7, 0.01, 0.999)
            .with_capability("render", ComponentStatus::Failed)
            .with_dependency("queue", ComponentStatus::Degraded),
        &thresholds,
    );
    let report = AgentHealthReport::build(&metrics, &thresholds, HealthTrends::InsufficientData);

    assert_eq!(
        report.recommendations,
        vec![
            "Consider optimizing agent processing logic to reduce response time",
            "Check for resource bottlenecks or inefficient algorithms",
            "Review error handling and input validation",
            "Check for external service dependencies that may be failing",
            "Check and fix degraded dependencies: queue",
        ]
    );
    assert!(
        report
            .critical_issues
            .contains(&"Critical: Response time is extremely high (12000.0ms)".to_owned())
    );
    assert!(
        report
            .critical_issues
            .contains(&"Critical: Failed capabilities: render".to_owned())
    );
}

#[rstest]
fn summary_counts_statuses_and_alerts(thresholds: HealthThresholds) {
    let healthy = metrics_from(HealthObservation::new(100.0, 1.0, 0.0, 1.0), &thresholds);
    let unhealthy = metrics_from(HealthObservation::new(300.0, 0.5, 0.0, 1.0), &thresholds);
    let quiet = AlertLog::new(10, 5);
    let mut noisy = AlertLog::new(10, 5);
    for raised in HealthAlert::evaluate(&unhealthy, &thresholds, Utc::now()) {
        noisy.push(raised);
    }
    noisy.push(alert("slow"));

    let summary = HealthSummary::build(
        [(&healthy, &quiet), (&unhealthy, &noisy)],
        Utc::now(),
    );

    assert_eq!(summary.total_agents, 2);
    assert_eq!(summary.health_distribution.healthy, 1);
    assert_eq!(summary.health_distribution.unhealthy, 1);
    assert!((summary.average_metrics.response_time_ms - 200.0).abs() < 1e-9);
    assert!((summary.average_metrics.success_rate - 0.75).abs() < 1e-9);
    assert_eq!(summary.alerts.total, 2);
    assert_eq!(summary.alerts.critical, 1);
    assert_eq!(summary.alerts.warning, 1);
}

#[rstest]
fn empty_summary_has_zero_averages() {
    let summary = HealthSummary::build(std::iter::empty(), Utc::now());
    assert_eq!(summary.total_agents, 0);
    assert!(summary.average_metrics.availability.abs() < f64::EPSILON);
}
