//! Capability key and contract domain tests.

use crate::capability::domain::{CapabilityDomainError, CapabilityKey, ContractKind};
use rstest::rstest;

#[test]
fn key_joins_trimmed_names_with_a_dot() {
    let key = CapabilityKey::from_parts(" FileParserService ", "parse_pdf")
        .expect("valid names should build a key");
    assert_eq!(key.as_str(), "FileParserService.parse_pdf");
}

#[rstest]
#[case("", "parse", CapabilityDomainError::EmptyServiceName)]
#[case("Svc", "  ", CapabilityDomainError::EmptyCapabilityName)]
fn key_rejects_blank_names(
    #[case] service: &str,
    #[case] capability: &str,
    #[case] expected: CapabilityDomainError,
) {
    assert_eq!(CapabilityKey::from_parts(service, capability), Err(expected));
}

#[test]
fn dotted_service_names_cannot_collide_with_dotted_capabilities() {
    assert_eq!(
        CapabilityKey::from_parts("a.b", "c"),
        Err(CapabilityDomainError::DottedServiceName("a.b".to_owned()))
    );
    let key = CapabilityKey::from_parts("a", "b.c").expect("dots are allowed in capability names");
    assert_eq!(key.as_str(), "a.b.c");
}

#[test]
fn blank_lookup_key_is_malformed() {
    assert!(matches!(
        CapabilityKey::parse("   "),
        Err(CapabilityDomainError::MalformedKey(_))
    ));
}

#[rstest]
#[case("rest_api", ContractKind::RestApi)]
#[case(" SOA_API ", ContractKind::SoaApi)]
#[case("mcp_tool", ContractKind::McpTool)]
fn contract_kinds_parse_case_insensitively(#[case] raw: &str, #[case] expected: ContractKind) {
    assert_eq!(ContractKind::try_from(raw), Ok(expected));
}

#[test]
fn unknown_contract_kind_is_rejected() {
    assert!(ContractKind::try_from("graphql").is_err());
}
