// End-to-end reconciliation tests: NetworkResource + Reconciler driving a
// wiremock Dashboard.

use std::collections::BTreeSet;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use merakisync_api::MerakiClient;
use merakisync_core::{
    NetworkId, NetworkPlan, NetworkResource, NetworkState, ProductType, Reconciler, Resource,
    Severity,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, MerakiClient) {
    let server = MockServer::start().await;
    let client = MerakiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn plan() -> NetworkPlan {
    NetworkPlan {
        organization_id: "549236".into(),
        name: "Branch".into(),
        time_zone: "America/Los_Angeles".into(),
        product_types: [ProductType::Switch, ProductType::Wireless]
            .into_iter()
            .collect(),
        tags: ["prod".to_owned()].into_iter().collect(),
        notes: None,
    }
}

fn state() -> NetworkState {
    NetworkState {
        id: NetworkId::from("N_1001"),
        organization_id: "549236".into(),
        name: "Branch".into(),
        time_zone: "America/Los_Angeles".into(),
        product_types: [ProductType::Switch, ProductType::Wireless]
            .into_iter()
            .collect(),
        tags: ["prod".to_owned()].into_iter().collect(),
        notes: None,
        url: Some("https://n1.meraki.com/N_1001/manage".into()),
        enrollment_string: None,
        bound_to_config_template: false,
    }
}

fn remote_network(url: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "id": "N_1001",
        "organizationId": "549236",
        "name": "Branch",
        "productTypes": ["switch", "wireless"],
        "timeZone": "America/Los_Angeles",
        "tags": tags,
        "url": url,
        "notes": null,
        "isBoundToConfigTemplate": false
    })
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_defaults_to_all_product_types() {
    let (server, client) = setup().await;

    let mut p = plan();
    p.product_types = BTreeSet::new();

    // The submitted set must equal the full fixed enumeration, not be empty.
    Mock::given(method("POST"))
        .and(path("/api/v1/organizations/549236/networks"))
        .and(body_json(json!({
            "name": "Branch",
            "timeZone": "America/Los_Angeles",
            "productTypes": [
                "appliance", "camera", "cellularGateway", "sensor",
                "switch", "systemsManager", "wireless",
            ],
            "tags": ["prod"],
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({
                "id": "N_1001",
                "organizationId": "549236",
                "name": "Branch",
                "productTypes": [
                    "appliance", "camera", "cellularGateway", "sensor",
                    "switch", "systemsManager", "wireless",
                ],
                "timeZone": "America/Los_Angeles",
                "tags": ["prod"],
                "url": "https://n1.meraki.com/N_1001/manage"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let created = resource.create(&p).await.unwrap();

    assert_eq!(created.product_types, ProductType::all());
    assert_eq!(created.id, NetworkId::from("N_1001"));
    assert_eq!(created.url.as_deref(), Some("https://n1.meraki.com/N_1001/manage"));
}

#[tokio::test]
async fn create_trusts_the_plan_over_the_echo() {
    let (server, client) = setup().await;

    // The server echoes a drifted name; only id and url may be merged.
    Mock::given(method("POST"))
        .and(path("/api/v1/organizations/549236/networks"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({
                "id": "N_1001",
                "organizationId": "549236",
                "name": "Branch (1)",
                "productTypes": ["switch", "wireless"],
                "timeZone": "UTC",
                "tags": [],
                "url": "https://n1.meraki.com/N_1001/manage"
            })),
        )
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let created = resource.create(&plan()).await.unwrap();

    assert_eq!(created.name, "Branch");
    assert_eq!(created.time_zone, "America/Los_Angeles");
    assert_eq!(created.tags, plan().tags);
    assert_eq!(created.url.as_deref(), Some("https://n1.meraki.com/N_1001/manage"));
}

#[tokio::test]
async fn create_conflict_surfaces_as_error_diagnostic() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/organizations/549236/networks"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "errors": ["Name is already taken"] })),
        )
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(&client);
    let diag = reconciler
        .reconcile_network(Some(&plan()), None)
        .await
        .unwrap_err();

    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.summary, "failed to create network");
    assert!(diag.detail.contains("Name is already taken"));
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_keeps_sticky_url() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks/N_1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_network("https://n7.meraki.com/moved", &["prod"])),
        )
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let refreshed = resource.read(&state()).await.unwrap();

    assert_eq!(refreshed.url.as_deref(), Some("https://n1.meraki.com/N_1001/manage"));
}

#[tokio::test]
async fn refresh_adopts_url_when_unknown() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks/N_1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_network("https://n7.meraki.com/moved", &["prod"])),
        )
        .mount(&server)
        .await;

    let mut prior = state();
    prior.url = None;

    let resource = NetworkResource::new(&client);
    let refreshed = resource.read(&prior).await.unwrap();

    assert_eq!(refreshed.url.as_deref(), Some("https://n7.meraki.com/moved"));
}

#[tokio::test]
async fn refresh_empty_tags_do_not_clobber_state() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks/N_1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_network("https://n1.meraki.com/N_1001/manage", &[])),
        )
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let refreshed = resource.read(&state()).await.unwrap();

    assert_eq!(refreshed.tags, state().tags);
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_with_no_diff_skips_the_remote_call() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/networks/N_1001"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let updated = resource.update(&plan(), &state()).await.unwrap();

    assert_eq!(updated, state());
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let (server, client) = setup().await;

    let mut p = plan();
    p.name = "Branch 2".into();

    Mock::given(method("PUT"))
        .and(path("/api/v1/networks/N_1001"))
        .and(body_json(json!({ "name": "Branch 2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_network("https://n1.meraki.com/N_1001/manage", &["prod"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let updated = resource.update(&p, &state()).await.unwrap();

    assert_eq!(updated.name, "Branch 2");
    assert_eq!(updated.id, state().id);
    assert_eq!(updated.url, state().url);
}

#[tokio::test]
async fn update_rejects_product_type_change_before_any_call() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/networks/N_1001"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut p = plan();
    p.product_types = [ProductType::Wireless].into_iter().collect();

    let resource = NetworkResource::new(&client);
    let err = resource.update(&p, &state()).await.unwrap_err();

    assert!(err.is_configuration_violation());
}

// ── Round trip ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_read_round_trips_desired_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/organizations/549236/networks"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(remote_network("https://n1.meraki.com/N_1001/manage", &["prod"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks/N_1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_network("https://n1.meraki.com/N_1001/manage", &["prod"])),
        )
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    let created = resource.create(&plan()).await.unwrap();
    let read = resource.read(&created).await.unwrap();

    assert_eq!(read.name, plan().name);
    assert_eq!(read.time_zone, plan().time_zone);
    assert_eq!(read.product_types, plan().product_types);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_read_reports_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/networks/N_1001"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks/N_1001"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resource = NetworkResource::new(&client);
    resource.delete(&state()).await.unwrap();

    let err = resource.read(&state()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn reconcile_to_absent_invalidates_identity() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/networks/N_1001"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(&client);
    let outcome = reconciler
        .reconcile_network(None, Some(&state()))
        .await
        .unwrap();

    assert_eq!(outcome, None);
}

#[tokio::test]
async fn failed_delete_leaves_state_retryable() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/networks/N_1001"))
        .respond_with(ResponseTemplate::new(409).set_body_string("network in use"))
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(&client);
    let diag = reconciler
        .reconcile_network(None, Some(&state()))
        .await
        .unwrap_err();

    assert_eq!(diag.summary, "failed to delete network");
    assert!(diag.detail.contains("network in use"));
}

// ── Import ──────────────────────────────────────────────────────────

#[tokio::test]
async fn import_populates_state_from_identifier_alone() {
    let (server, client) = setup().await;

    // Import has no organization id yet, so it must use the unscoped read.
    Mock::given(method("GET"))
        .and(path("/api/v1/networks/N_1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(remote_network("https://n1.meraki.com/N_1001/manage", &["prod"])),
        )
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(&client);
    let imported = reconciler.import_network("N_1001").await.unwrap();

    assert_eq!(imported.organization_id, "549236");
    assert_eq!(imported.name, "Branch");
    assert_eq!(imported.url.as_deref(), Some("https://n1.meraki.com/N_1001/manage"));
}
