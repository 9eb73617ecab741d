//! Specialization rollup and health report tests.

use crate::specialization::domain::{
    AgentSpecialization, CatalogSpecialization, SpecializationAnalytics,
    SpecializationHealthReport, SpecializationRequest, SpecializationStatus,
    SpecializationUsage,
};
use chrono::Utc;
use rstest::rstest;
use std::collections::{BTreeMap, BTreeSet};

fn bound(agent_id: &str, request: SpecializationRequest) -> AgentSpecialization {
    AgentSpecialization::bind(agent_id, agent_id, request, Utc::now())
        .expect("binding should succeed")
}

fn analytics(id: &str, success_rate: f64, usage: u64, active: usize) -> SpecializationAnalytics {
    SpecializationAnalytics {
        specialization_id: id.to_owned(),
        specialization_name: id.to_owned(),
        pillar: "general".to_owned(),
        total_agents: 1,
        active_agents: active,
        deprecated_agents: 1 - active,
        experimental_agents: 0,
        average_success_rate: success_rate,
        total_usage_count: usage,
        capabilities_count: 0,
        last_updated: Utc::now(),
    }
}

#[rstest]
fn binding_defaults_name_to_id() {
    let binding = bound("agent-1", SpecializationRequest::new("translator"));
    assert_eq!(binding.specialization_name, "translator");
    assert_eq!(binding.pillar, "general");
    assert_eq!(binding.version, "1.0.0");
    assert_eq!(binding.usage_count, 0);
}

#[rstest]
fn success_rate_is_successes_over_total() {
    let mut usage = SpecializationUsage::default();
    let now = Utc::now();
    for success in [true, true, true, false] {
        usage.record(success, Some("translate"), now);
    }
    assert!((usage.success_rate() - 0.75).abs() < f64::EPSILON);
    assert_eq!(usage.failed_uses, 1);
    assert_eq!(usage.usage_by_capability.get("translate"), Some(&4));
}

#[rstest]
fn derive_without_catalog_uses_binding_details() {
    let first = bound(
        "agent-1",
        SpecializationRequest::new("translator")
            .with_name("Translator")
            .with_pillar("content")
            .with_capability("translate"),
    );
    let second = bound(
        "agent-2",
        SpecializationRequest::new("translator").with_status(SpecializationStatus::Experimental),
    );

    let rollup = SpecializationAnalytics::derive("translator", &[&first, &second], None, Utc::now())
        .expect("bound specialization should have analytics");

    assert_eq!(rollup.specialization_name, "Translator");
    assert_eq!(rollup.pillar, "content");
    assert_eq!(rollup.total_agents, 2);
    assert_eq!(rollup.active_agents, 1);
    assert_eq!(rollup.experimental_agents, 1);
    assert_eq!(rollup.capabilities_count, 1);
}

#[rstest]
fn derive_prefers_catalog_details() {
    let agent = bound("agent-1", SpecializationRequest::new("translator"));
    let entry = CatalogSpecialization::new("translator", "Catalog Translator")
        .with_pillar("experience")
        .with_capability("translate")
        .with_capability("detect_language");

    let rollup = SpecializationAnalytics::derive("translator", &[&agent], Some(&entry), Utc::now())
        .expect("bound specialization should have analytics");

    assert_eq!(rollup.specialization_name, "Catalog Translator");
    assert_eq!(rollup.pillar, "experience");
    assert_eq!(rollup.capabilities_count, 2);
}

#[rstest]
fn derive_without_agents_yields_nothing() {
    assert!(SpecializationAnalytics::derive("idle", &[], None, Utc::now()).is_none());
}

#[rstest]
fn health_report_classifies_and_ranks() {
    let entries = vec![
        analytics("a", 0.9, 10, 1),
        analytics("b", 0.6, 50, 1),
        analytics("c", 0.9, 40, 1),
        analytics("d", 0.95, 1, 0),
        analytics("e", 0.2, 5, 1),
        analytics("f", 0.85, 3, 1),
    ];
    let mut pillars = BTreeMap::new();
    pillars.insert(
        "general".to_owned(),
        ["a", "b", "c"].into_iter().map(str::to_owned).collect::<BTreeSet<_>>(),
    );

    let report = SpecializationHealthReport::build(6, 6, &entries, &pillars, Utc::now());

    assert_eq!(report.health_summary.healthy_specializations, 3);
    assert_eq!(report.health_summary.degraded_specializations, 1);
    assert_eq!(report.health_summary.unhealthy_specializations, 2);
    assert_eq!(report.pillar_distribution.get("general"), Some(&3));
    let ranked: Vec<&str> = report
        .top_performing_specializations
        .iter()
        .map(|entry| entry.specialization_id.as_str())
        .collect();
    assert_eq!(ranked, vec!["d", "c", "a", "f", "b"]);
}
