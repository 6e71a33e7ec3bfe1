use netswap_model::{
    parse_network_id, parse_org_id, parse_serial, Device, Network, OperationStep, Organization,
    StepStatus,
};

#[test]
fn serial_grammar_is_strict() {
    assert!(parse_serial("AAAA-1111-BBBB").is_ok());
    assert!(parse_serial("").is_err());
    assert!(parse_serial("AAAA1111BBBB").is_err());
    assert!(parse_serial("AAAA-1111-BBB?").is_err());
    assert!(parse_serial("AAAA--1111-BBBB").is_err());
}

#[test]
fn organization_and_network_construct_from_parsed_ids() {
    let org = Organization::new(parse_org_id("org-1").expect("org"), "Acme West");
    let network = Network::new(
        parse_network_id("N_1").expect("network"),
        "HQ",
        org.id.clone(),
    );
    assert_eq!(network.organization_id.as_ref(), Some(&org.id));
}

#[test]
fn unclaimed_inventory_device_has_no_network() {
    let raw = r#"{"serial":"CCCC-2222-DDDD","model":"MS120"}"#;
    let device: Device = serde_json::from_str(raw).expect("inventory row");
    assert!(device.is_unclaimed());
    assert!(device.tags.is_empty());
}

#[test]
fn step_records_are_one_based_and_terminal() {
    let step = OperationStep::completed(1, "Fetch configuration", "2026-01-01T00:00:00Z");
    assert_eq!(step.step, 1);
    assert!(step.status.is_terminal());
    assert!(!StepStatus::InProgress.is_terminal());
}
