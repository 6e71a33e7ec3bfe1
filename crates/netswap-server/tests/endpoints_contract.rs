use netswap_engine::FileRecorder;
use netswap_model::{
    parse_network_id, parse_org_id, parse_serial, Device, Network, NetworkId, OrgId, Organization,
    Serial,
};
use netswap_platform::{FakePlatform, OrgRegistry, Platform};
use netswap_server::{build_router, AppState, ServerConfig};
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const FAILED: &str = "AAAA-1111-BBBB";
const REPLACEMENT: &str = "CCCC-2222-DDDD";

fn org_id(s: &str) -> OrgId {
    parse_org_id(s).expect("org id")
}

fn network_id(s: &str) -> NetworkId {
    parse_network_id(s).expect("network id")
}

fn serial(s: &str) -> Serial {
    parse_serial(s).expect("serial")
}

/// org-1 owns network N_1 with the failed device claimed and the
/// replacement unclaimed in inventory.
async fn seeded_org() -> Arc<FakePlatform> {
    let fake = Arc::new(FakePlatform::new(Organization::new(org_id("org-1"), "Acme")));
    fake.networks
        .lock()
        .await
        .push(Network::new(network_id("N_1"), "HQ", org_id("org-1")));
    let mut failed = Device::new(serial(FAILED));
    failed.network_id = Some(network_id("N_1"));
    failed.name = Some("lobby-ap".to_string());
    fake.devices
        .lock()
        .await
        .insert((network_id("N_1"), serial(FAILED)), failed);
    fake.inventory
        .lock()
        .await
        .push(Device::new(serial(REPLACEMENT)));
    fake
}

fn state_of(orgs: Vec<(&str, Arc<FakePlatform>)>) -> AppState {
    let registry = OrgRegistry::with_platforms(
        orgs.into_iter()
            .map(|(id, fake)| (org_id(id), fake as Arc<dyn Platform>))
            .collect(),
    );
    AppState::new(Arc::new(registry), ServerConfig::default())
}

async fn serve(state: AppState) -> std::net::SocketAddr {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(body) = body {
        req.push_str("Content-Type: application/json\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    req.push_str("\r\n");
    if let Some(body) = body {
        req.push_str(body);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

fn pair_body(failed: &str, replacement: &str) -> String {
    format!(r#"{{"failedSerial":"{failed}","replacementSerial":"{replacement}"}}"#)
}

#[tokio::test]
async fn health_reports_per_org_accessibility() {
    let reachable = seeded_org().await;
    let unreachable = Arc::new(FakePlatform::new(Organization::new(org_id("org-2"), "Beta")));
    unreachable.unreachable.store(true, Ordering::Relaxed);
    let addr = serve(state_of(vec![
        ("org-1", reachable),
        ("org-2", unreachable),
    ]))
    .await;

    let (status, _, body) = send_raw(addr, "GET", "/health", None).await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("health json");
    assert_eq!(json["success"], true);
    let orgs = json["organizations"].as_array().expect("organizations");
    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0]["organizationId"], "org-1");
    assert_eq!(orgs[0]["accessible"], true);
    assert_eq!(orgs[0]["networkCount"], 1);
    assert_eq!(orgs[1]["accessible"], false);
    assert!(orgs[1].get("networkCount").is_none());
}

#[tokio::test]
async fn organizations_listing_masks_credentials() {
    let addr = serve(state_of(vec![("org-1", seeded_org().await)])).await;

    let (status, _, body) = send_raw(addr, "GET", "/organizations", None).await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("organizations json");
    let orgs = json["organizations"].as_array().expect("organizations");
    assert_eq!(orgs[0]["maskedCredential"], "****");
    assert_eq!(orgs[0]["organizationName"], "Acme");
}

#[tokio::test]
async fn networks_listing_spans_all_orgs() {
    let addr = serve(state_of(vec![("org-1", seeded_org().await)])).await;

    let (status, _, body) = send_raw(addr, "GET", "/networks", None).await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("networks json");
    assert_eq!(json["success"], true);
    let networks = json["networks"].as_array().expect("networks");
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0]["id"], "N_1");
    assert_eq!(networks[0]["organizationId"], "org-1");
}

#[tokio::test]
async fn search_device_round_trips_and_404s() {
    let addr = serve(state_of(vec![("org-1", seeded_org().await)])).await;

    let (status, _, body) = send_raw(addr, "GET", &format!("/search-device/{FAILED}"), None).await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("search json");
    assert_eq!(json["success"], true);
    assert_eq!(json["device"]["serial"], FAILED);
    assert_eq!(json["network"]["id"], "N_1");

    let (status, _, body) =
        send_raw(addr, "GET", "/search-device/ZZZZ-9999-ZZZZ", None).await;
    assert_eq!(status, 404);
    let json: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "device_not_found");
    assert!(json["message"]
        .as_str()
        .expect("message")
        .contains("org-1"));
}

#[tokio::test]
async fn validate_devices_returns_full_context() {
    let addr = serve(state_of(vec![("org-1", seeded_org().await)])).await;

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/validate-devices",
        Some(&pair_body(FAILED, REPLACEMENT)),
    )
    .await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("validation json");
    assert_eq!(json["success"], true);
    assert_eq!(json["failedDevice"]["serial"], FAILED);
    assert_eq!(json["replacementDevice"]["serial"], REPLACEMENT);
    assert_eq!(json["networkId"], "N_1");
    assert_eq!(json["organizationId"], "org-1");
    assert_eq!(json["organizationName"], "Acme");
}

#[tokio::test]
async fn serial_rules_are_enforced_before_discovery() {
    let fake = seeded_org().await;
    let addr = serve(state_of(vec![("org-1", fake.clone())])).await;

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/validate-devices",
        Some(&pair_body("not-a-serial", REPLACEMENT)),
    )
    .await;
    assert_eq!(status, 400);
    let json: Value = serde_json::from_str(&body).expect("format error json");
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "validation_format");

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/validate-devices",
        Some(&pair_body(FAILED, FAILED)),
    )
    .await;
    assert_eq!(status, 400);
    let json: Value = serde_json::from_str(&body).expect("same serial json");
    assert_eq!(json["code"], "same_serial");

    // Rejected pairs never reached the platform.
    assert!(fake.call_log().await.is_empty());
}

#[tokio::test]
async fn replace_device_runs_pipeline_and_audits() {
    let fake = seeded_org().await;
    let dir = tempdir().expect("tempdir");
    let audit_path = dir.path().join("audit.log");
    let registry = OrgRegistry::with_platforms(vec![(
        org_id("org-1"),
        fake.clone() as Arc<dyn Platform>,
    )]);
    let state = AppState::with_recorder(
        Arc::new(registry),
        ServerConfig::default(),
        Arc::new(FileRecorder::new(&audit_path)),
    );
    let addr = serve(state).await;

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/replace-device",
        Some(&pair_body(FAILED, REPLACEMENT)),
    )
    .await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("replace json");
    assert_eq!(json["success"], true);
    let operations = json["operations"].as_array().expect("operations");
    assert_eq!(operations.len(), 4);
    assert!(operations
        .iter()
        .all(|op| op["status"] == "completed"));
    let transferred = json["summary"]["transferred"]
        .as_array()
        .expect("transferred");
    assert_eq!(transferred[0], "hostname");

    assert!(fake.removed.lock().await.contains(&serial(FAILED)));
    let audit = std::fs::read_to_string(&audit_path).expect("audit log");
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains("\"status\":\"success\""));
}

#[tokio::test]
async fn replace_device_surfaces_partial_failure_history() {
    let fake = seeded_org().await;
    fake.fail_operation(
        "updateDevice",
        netswap_platform::PlatformError::new(
            netswap_platform::PlatformErrorCode::Api,
            "invalid address",
        ),
    )
    .await;
    let addr = serve(state_of(vec![("org-1", fake)])).await;

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/replace-device",
        Some(&pair_body(FAILED, REPLACEMENT)),
    )
    .await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("replace json");
    assert_eq!(json["success"], false);
    let operations = json["operations"].as_array().expect("operations");
    assert_eq!(operations.len(), 3);
    assert_eq!(operations[1]["status"], "completed");
    assert_eq!(operations[2]["status"], "failed");
    assert_eq!(operations[2]["error"], "invalid address");
    assert!(json.get("summary").is_none());
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let addr = serve(state_of(vec![("org-1", seeded_org().await)])).await;
    let (_, head, _) = send_raw(addr, "GET", "/health", None).await;
    assert!(head.to_ascii_lowercase().contains("x-request-id"));
}
