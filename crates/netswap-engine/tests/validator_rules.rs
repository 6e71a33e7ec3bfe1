use netswap_core::ErrorCode;
use netswap_engine::DeviceValidator;
use netswap_model::{
    parse_network_id, parse_org_id, parse_serial, Device, DeviceStatusRecord, Network, NetworkId,
    OrgId, Organization, Serial,
};
use netswap_platform::{FakePlatform, OrgRegistry, Platform, PlatformError, PlatformErrorCode};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn org_id(s: &str) -> OrgId {
    parse_org_id(s).expect("org id")
}

fn network_id(s: &str) -> NetworkId {
    parse_network_id(s).expect("network id")
}

fn serial(s: &str) -> Serial {
    parse_serial(s).expect("serial")
}

const FAILED: &str = "AAAA-1111-BBBB";
const REPLACEMENT: &str = "CCCC-2222-DDDD";

/// org-1 with network N_1 owning the failed device.
async fn org_a() -> Arc<FakePlatform> {
    let fake = Arc::new(FakePlatform::new(Organization::new(org_id("org-1"), "Acme")));
    fake.networks
        .lock()
        .await
        .push(Network::new(network_id("N_1"), "HQ", org_id("org-1")));
    let mut failed = Device::new(serial(FAILED));
    failed.network_id = Some(network_id("N_1"));
    fake.devices
        .lock()
        .await
        .insert((network_id("N_1"), serial(FAILED)), failed);
    fake
}

fn registry_of(orgs: Vec<(&str, Arc<FakePlatform>)>) -> OrgRegistry {
    OrgRegistry::with_platforms(
        orgs.into_iter()
            .map(|(id, fake)| (org_id(id), fake as Arc<dyn Platform>))
            .collect(),
    )
}

#[tokio::test]
async fn accepts_unclaimed_replacement_in_same_org_inventory() {
    let fake = org_a().await;
    fake.inventory
        .lock()
        .await
        .push(Device::new(serial(REPLACEMENT)));
    let registry = registry_of(vec![("org-1", fake)]);

    let validated = DeviceValidator::new(&registry)
        .validate(&serial(FAILED), &serial(REPLACEMENT))
        .await
        .expect("validation");
    assert_eq!(validated.organization_id.as_str(), "org-1");
    assert_eq!(validated.network_id.as_str(), "N_1");
    assert_eq!(validated.replacement_device.serial, serial(REPLACEMENT));
}

#[tokio::test]
async fn missing_failed_device_names_all_searched_orgs() {
    let fake = org_a().await;
    let registry = registry_of(vec![("org-1", fake)]);

    let err = DeviceValidator::new(&registry)
        .validate(&serial("ZZZZ-9999-ZZZZ"), &serial(REPLACEMENT))
        .await
        .expect_err("unknown serial");
    assert_eq!(err.code, ErrorCode::DeviceNotFound);
    assert!(err.message.contains("org-1"));
}

#[tokio::test]
async fn replacement_in_other_org_inventory_is_rejected() {
    let fake_a = org_a().await;
    let fake_b = Arc::new(FakePlatform::new(Organization::new(org_id("org-2"), "Beta")));
    fake_b
        .inventory
        .lock()
        .await
        .push(Device::new(serial(REPLACEMENT)));
    // Accessibility of the other org must not matter.
    fake_b.unreachable.store(true, Ordering::Relaxed);
    let registry = registry_of(vec![("org-1", fake_a), ("org-2", fake_b)]);

    let err = DeviceValidator::new(&registry)
        .validate(&serial(FAILED), &serial(REPLACEMENT))
        .await
        .expect_err("replacement outside owning org");
    assert_eq!(err.code, ErrorCode::ReplacementNotFound);
}

#[tokio::test]
async fn replacement_claimed_by_other_network_is_a_conflict() {
    let fake = org_a().await;
    let mut claimed = Device::new(serial(REPLACEMENT));
    claimed.network_id = Some(network_id("N_2"));
    fake.inventory.lock().await.push(claimed);
    let registry = registry_of(vec![("org-1", fake)]);

    let err = DeviceValidator::new(&registry)
        .validate(&serial(FAILED), &serial(REPLACEMENT))
        .await
        .expect_err("claim conflict");
    assert_eq!(err.code, ErrorCode::ClaimConflict);
    assert_eq!(
        err.details.get("conflictingNetworkId").map(String::as_str),
        Some("N_2")
    );
}

#[tokio::test]
async fn replacement_already_in_target_network_passes_validation() {
    let fake = org_a().await;
    let mut claimed = Device::new(serial(REPLACEMENT));
    claimed.network_id = Some(network_id("N_1"));
    fake.inventory.lock().await.push(claimed);
    let registry = registry_of(vec![("org-1", fake)]);

    assert!(DeviceValidator::new(&registry)
        .validate(&serial(FAILED), &serial(REPLACEMENT))
        .await
        .is_ok());
}

#[tokio::test]
async fn enrichment_fills_status_and_is_best_effort() {
    let fake = org_a().await;
    fake.inventory
        .lock()
        .await
        .push(Device::new(serial(REPLACEMENT)));
    fake.statuses.lock().await.push(DeviceStatusRecord {
        serial: serial(FAILED),
        status: Some("offline".to_string()),
        lan_ip: Some("10.0.0.9".to_string()),
        public_ip: None,
        mac: Some("aa:bb:cc:dd:ee:ff".to_string()),
    });
    let registry = registry_of(vec![("org-1", fake)]);

    let validated = DeviceValidator::new(&registry)
        .validate(&serial(FAILED), &serial(REPLACEMENT))
        .await
        .expect("validation");
    assert_eq!(validated.failed_device.status.as_deref(), Some("offline"));
    assert_eq!(validated.failed_device.lan_ip.as_deref(), Some("10.0.0.9"));
}

#[tokio::test]
async fn enrichment_failure_returns_unenriched_record() {
    let fake = org_a().await;
    fake.inventory
        .lock()
        .await
        .push(Device::new(serial(REPLACEMENT)));
    fake.fail_operation(
        "getDeviceStatuses",
        PlatformError::new(PlatformErrorCode::RateLimited, "429"),
    )
    .await;
    let registry = registry_of(vec![("org-1", fake)]);

    let validated = DeviceValidator::new(&registry)
        .validate(&serial(FAILED), &serial(REPLACEMENT))
        .await
        .expect("validation despite enrichment failure");
    assert!(validated.failed_device.status.is_none());
}
