//! Agent health monitor orchestration tests.

use std::sync::Arc;
use std::time::Duration;

use crate::agent_health::{
    adapters::ReportedHealthProbe,
    domain::{HealthObservation, HealthStatus, HealthTrends},
    ports::{MockAgentHealthProbe, ProbeError},
    services::{AgentHealthMonitor, AgentHealthMonitorError},
};
use crate::config::HealthMonitorConfig;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestMonitor = AgentHealthMonitor<DefaultClock>;

fn manual_config() -> HealthMonitorConfig {
    HealthMonitorConfig {
        enabled: false,
        ..HealthMonitorConfig::default()
    }
}

#[fixture]
fn probe() -> ReportedHealthProbe {
    ReportedHealthProbe::new()
}

fn monitor_for(probe: &ReportedHealthProbe, config: HealthMonitorConfig) -> TestMonitor {
    AgentHealthMonitor::new(Arc::new(probe.clone()), config, Arc::new(DefaultClock))
}

fn healthy() -> HealthObservation {
    HealthObservation::new(120.0, 0.99, 0.01, 0.999)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_starts_unknown(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());

    let metrics = monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");

    assert_eq!(metrics.overall_status, HealthStatus::Unknown);
    assert!(metrics.last_health_check.is_none());
    assert!(metrics.alerts.is_empty());
    assert_eq!(monitor.running_monitors(), 0);
    assert_eq!(
        monitor
            .get_health_history("agent-1")
            .expect("history read should succeed"),
        Some(Vec::new())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_agent_id_is_rejected(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    let result = monitor.register_agent("  ", "nameless");
    assert!(matches!(result, Err(AgentHealthMonitorError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reregistration_keeps_history_and_renames(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");
    probe
        .report_observation("agent-1", healthy())
        .expect("observation should be accepted");
    monitor
        .run_health_check("agent-1")
        .await
        .expect("health check should succeed");

    let metrics = monitor
        .register_agent("agent-1", "Renamed")
        .expect("re-registration should succeed");

    assert_eq!(metrics.agent_name, "Renamed");
    assert_eq!(metrics.overall_status, HealthStatus::Healthy);
    assert_eq!(monitor.monitored_count().expect("count should succeed"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn check_classifies_and_records_history(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");
    probe
        .report_observation("agent-1", HealthObservation::new(7_000.0, 0.99, 0.0, 1.0))
        .expect("observation should be accepted");

    let metrics = monitor
        .run_health_check("agent-1")
        .await
        .expect("health check should succeed");

    assert_eq!(metrics.overall_status, HealthStatus::Degraded);
    assert!(metrics.last_health_check.is_some());
    assert_eq!(metrics.alerts.len(), 1);
    let history = monitor
        .get_health_history("agent-1")
        .expect("history read should succeed")
        .expect("agent should have history");
    assert_eq!(history.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_conditions_do_not_duplicate_alerts(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");
    probe
        .report_observation("agent-1", HealthObservation::new(6_000.0, 0.5, 0.0, 1.0))
        .expect("observation should be accepted");

    for _ in 0..6 {
        monitor
            .run_health_check("agent-1")
            .await
            .expect("health check should succeed");
    }

    let metrics = monitor
        .get_agent_health("agent-1")
        .expect("read should succeed")
        .expect("agent should be monitored");
    assert_eq!(metrics.overall_status, HealthStatus::Unhealthy);
    assert_eq!(metrics.alerts.len(), 2);
    let summary = monitor.get_health_summary().expect("summary should succeed");
    assert_eq!(summary.alerts.total, 2);
    assert_eq!(summary.alerts.critical, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_is_capped_at_capacity(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");

    for cycle in 0..150_u32 {
        probe
            .report_observation(
                "agent-1",
                HealthObservation::new(f64::from(cycle), 1.0, 0.0, 1.0),
            )
            .expect("observation should be accepted");
        monitor
            .run_health_check("agent-1")
            .await
            .expect("health check should succeed");
    }

    let history = monitor
        .get_health_history("agent-1")
        .expect("history read should succeed")
        .expect("agent should have history");
    assert_eq!(history.len(), 100);
    assert_eq!(history.first().map(|e| e.response_time_ms), Some(50.0));
    assert_eq!(history.last().map(|e| e.response_time_ms), Some(149.0));
    assert!(
        history
            .windows(2)
            .all(|pair| matches!(pair, [older, newer] if older.timestamp <= newer.timestamp))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_sample_keeps_previous_metrics(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");
    probe
        .report_observation("agent-1", healthy())
        .expect("observation should be accepted");
    let before = monitor
        .run_health_check("agent-1")
        .await
        .expect("health check should succeed");
    assert!(probe.forget("agent-1").expect("forget should succeed"));

    let result = monitor.run_health_check("agent-1").await;

    assert!(matches!(
        result,
        Err(AgentHealthMonitorError::Probe(ProbeError::NoObservation(_)))
    ));
    let after = monitor
        .get_agent_health("agent-1")
        .expect("read should succeed")
        .expect("agent should be monitored");
    assert_eq!(after, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_probe_leaves_agent_unknown() {
    let mut probe = MockAgentHealthProbe::new();
    probe.expect_observe().times(1).returning(|agent_id| {
        Err(ProbeError::Unreachable {
            agent_id: agent_id.to_owned(),
            reason: "connection refused".to_owned(),
        })
    });
    let monitor: TestMonitor =
        AgentHealthMonitor::new(Arc::new(probe), manual_config(), Arc::new(DefaultClock));
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");

    let result = monitor.run_health_check("agent-1").await;

    assert!(matches!(result, Err(AgentHealthMonitorError::Probe(_))));
    let metrics = monitor
        .get_agent_health("agent-1")
        .expect("read should succeed")
        .expect("agent should be monitored");
    assert_eq!(metrics.overall_status, HealthStatus::Unknown);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_agent_cannot_be_checked(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    let result = monitor.run_health_check("ghost").await;
    assert!(matches!(result, Err(AgentHealthMonitorError::NotMonitored(_))));
    assert!(
        monitor
            .get_agent_health_report("ghost")
            .expect("read should succeed")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reports_include_trends(probe: ReportedHealthProbe) {
    let monitor = monitor_for(&probe, manual_config());
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");
    monitor
        .register_agent("agent-2", "Agent Two")
        .expect("registration should succeed");
    for response_time_ms in [300.0, 200.0, 100.0] {
        probe
            .report_observation("agent-1", HealthObservation::new(response_time_ms, 1.0, 0.0, 1.0))
            .expect("observation should be accepted");
        monitor
            .run_health_check("agent-1")
            .await
            .expect("health check should succeed");
    }

    let reports = monitor
        .get_all_agent_health_reports()
        .expect("reports should succeed");

    assert_eq!(reports.len(), 2);
    let first = reports.first().expect("first report should exist");
    assert_eq!(first.agent_id, "agent-1");
    assert!(matches!(first.trends, HealthTrends::Analysed { data_points: 3, .. }));
    let second = reports.get(1).expect("second report should exist");
    assert_eq!(second.trends, HealthTrends::InsufficientData);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enabled_monitor_checks_in_background(probe: ReportedHealthProbe) {
    let config = HealthMonitorConfig {
        check_interval_secs: 3_600,
        ..HealthMonitorConfig::default()
    };
    let monitor = monitor_for(&probe, config);
    probe
        .report_observation("agent-1", healthy())
        .expect("observation should be accepted");

    monitor
        .register_agent("agent-1", "Agent One")
        .expect("registration should succeed");
    monitor
        .register_agent("agent-1", "Agent One")
        .expect("re-registration should succeed");
    assert_eq!(monitor.running_monitors(), 1);

    let mut checked = false;
    for _ in 0..100 {
        let metrics = monitor
            .get_agent_health("agent-1")
            .expect("read should succeed")
            .expect("agent should be monitored");
        if metrics.last_health_check.is_some() {
            checked = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(checked, "background task should run its first check immediately");

    assert!(monitor.unregister_agent("agent-1").expect("unregister should succeed"));
    assert!(!monitor.is_monitoring("agent-1"));
    monitor.shutdown().await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_register_and_unregister_leave_no_orphan_tasks(probe: ReportedHealthProbe) {
    let config = HealthMonitorConfig {
        check_interval_secs: 3_600,
        ..HealthMonitorConfig::default()
    };
    let monitor = monitor_for(&probe, config);
    let agents: Vec<String> = (0..8).map(|n| format!("agent-{n}")).collect();

    for _ in 0..50 {
        let mut handles = Vec::new();
        for agent in &agents {
            let registering = monitor.clone();
            let registered_id = agent.clone();
            handles.push(tokio::spawn(async move {
                registering
                    .register_agent(&registered_id, "Racing Agent")
                    .map(|_| ())
            }));
            let unregistering = monitor.clone();
            let unregistered_id = agent.clone();
            handles.push(tokio::spawn(async move {
                unregistering.unregister_agent(&unregistered_id).map(|_| ())
            }));
        }
        for handle in handles {
            handle
                .await
                .expect("task should not panic")
                .expect("operation should succeed");
        }

        for agent in &agents {
            let registered = monitor
                .get_agent_health(agent)
                .expect("read should succeed")
                .is_some();
            assert_eq!(registered, monitor.is_monitoring(agent), "agent {agent}");
        }
    }

    monitor.shutdown().await;
    assert_eq!(monitor.running_monitors(), 0);
}
