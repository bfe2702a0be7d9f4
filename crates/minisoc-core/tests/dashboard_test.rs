#![allow(clippy::unwrap_used)]
// End-to-end tests for `Dashboard` against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use minisoc_api::ApiClient;
use minisoc_core::{CoreError, Dashboard, Domain, NginxView, PanelPhase, TableView};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let api = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, Dashboard::with_client(api, 24))
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_backend(server: &MockServer) {
    mount_get(
        server,
        "/api/ssh/stats",
        json!({
            "total_attempts": 40, "successful": 30, "failed": 10, "suspicious": 2,
            "top_failed_ips": [{"ip": "203.0.113.7", "count": 8}]
        }),
    )
    .await;
    mount_get(
        server,
        "/api/nginx/stats",
        json!({"access": {"total_requests": 500, "avg_response_time": 0.02,
                          "top_paths": [], "status_distribution": []}}),
    )
    .await;
    mount_get(
        server,
        "/api/attacks/summary",
        json!({"total_attacks": 3, "critical_attacks": 1, "unresolved_attacks": 2}),
    )
    .await;
    mount_get(
        server,
        "/api/ssh/timeline",
        json!({"interval": "hour", "data": []}),
    )
    .await;
    mount_get(
        server,
        "/api/attacks/stats",
        json!({"total_attacks": 3, "critical_attacks": 1, "unresolved_attacks": 2,
               "severity_distribution": [], "attack_types": [], "top_attackers": []}),
    )
    .await;
    mount_get(
        server,
        "/api/attacks/logs",
        json!({"total": 1, "attacks": [{
            "id": 42, "timestamp": "2024-05-01T10:00:00", "attack_type": "XSS",
            "severity": "HIGH", "source_ip": "192.0.2.10", "resolved": false
        }]}),
    )
    .await;
}

async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == route)
        .count()
}

async fn wait_for_phase(rx: &mut tokio::sync::watch::Receiver<PanelPhase>, phase: PanelPhase) {
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|p| *p == phase))
        .await
        .expect("phase reached in time")
        .unwrap();
}

// ── Launch ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_launch_opens_overview_and_badge() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/ssh/stats"))
        .and(query_param("hours", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_backend(&server).await;

    let mut phase = dashboard.overview().subscribe_phase();
    dashboard.launch().await.unwrap();

    assert_eq!(dashboard.active(), Some(Domain::Overview));
    assert_eq!(dashboard.tabs().polling(), vec![Domain::Overview]);
    assert!(dashboard.badge().has_timer());

    wait_for_phase(&mut phase, PanelPhase::Active).await;
    let stats = dashboard.overview().view().stats.unwrap();
    assert_eq!(stats.ssh.unwrap().failed, 10);
    assert_eq!(stats.attacks.unwrap().total_attacks, 3);

    let mut badge = dashboard.badge().subscribe_phase();
    wait_for_phase(&mut badge, PanelPhase::Active).await;
    let state = dashboard.badge_state();
    assert!(state.visible);
    assert_eq!(state.count, 3);

    dashboard.shutdown();
    assert!(dashboard.tabs().polling().is_empty());
    assert!(!dashboard.badge().has_timer());
}

#[tokio::test]
async fn test_launch_fails_when_probe_fails() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/ssh/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = dashboard.launch().await;
    match result {
        Err(CoreError::BackendUnreachable { url, reason }) => {
            assert_eq!(url, format!("{}/", server.uri()));
            assert!(reason.contains("503"), "reason: {reason}");
        }
        other => panic!("expected BackendUnreachable, got: {other:?}"),
    }
    assert_eq!(dashboard.active(), None);
    assert!(!dashboard.badge().has_timer());
}

// ── Tabs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_switching_tabs_keeps_one_panel_polling() {
    let (server, dashboard) = setup().await;
    mount_backend(&server).await;

    dashboard.switch_to(Domain::Overview);
    dashboard.switch_to(Domain::Attacks);

    assert_eq!(dashboard.tabs().polling(), vec![Domain::Attacks]);
    assert_eq!(dashboard.overview().phase(), PanelPhase::Idle);
    assert!(!dashboard.overview().has_timer());

    dashboard.switch_to(Domain::Attacks);
    assert_eq!(dashboard.tabs().polling(), vec![Domain::Attacks]);
    dashboard.shutdown();
}

// ── Panels ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_logs_show_placeholder() {
    let (server, dashboard) = setup().await;
    mount_backend(&server).await;
    mount_get(&server, "/api/ssh/logs", json!({"total": 0, "logs": []})).await;

    let mut phase = dashboard.ssh().subscribe_phase();
    dashboard.switch_to(Domain::Ssh);
    wait_for_phase(&mut phase, PanelPhase::Active).await;

    assert_eq!(dashboard.ssh().view().table, TableView::Empty);
    dashboard.shutdown();
}

#[tokio::test]
async fn test_stats_failure_keeps_rows_and_reports_error() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/nginx/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/api/nginx/access/logs",
        json!({"logs": [{"timestamp": "2024-05-01T10:00:00", "method": "GET",
                         "path": "/", "status_code": 200, "ip_address": "198.51.100.2"}]}),
    )
    .await;

    let mut phase = dashboard.nginx().subscribe_phase();
    dashboard.switch_to(Domain::Nginx);
    wait_for_phase(&mut phase, PanelPhase::Error).await;

    let view = dashboard.nginx().view();
    assert_eq!(view.stats, None);
    assert_eq!(view.table.rows().len(), 1);
    assert_eq!(view.last_error.as_deref(), Some("HTTP error! status: 500"));
    assert!(dashboard.nginx().has_timer());
    dashboard.shutdown();
}

#[tokio::test]
async fn test_nginx_view_switch_loads_error_log() {
    let (server, dashboard) = setup().await;
    mount_backend(&server).await;
    mount_get(&server, "/api/nginx/access/logs", json!({"logs": []})).await;
    mount_get(
        &server,
        "/api/nginx/error/logs",
        json!({"logs": [{"timestamp": "2024-05-01T10:00:00", "level": "crit",
                         "message": "worker exited"}]}),
    )
    .await;

    let mut phase = dashboard.nginx().subscribe_phase();
    dashboard.switch_to(Domain::Nginx);
    wait_for_phase(&mut phase, PanelPhase::Active).await;

    let applied = dashboard
        .nginx()
        .switch_view(NginxView::Error)
        .expect("panel is running")
        .await
        .unwrap();
    assert!(applied);
    assert_eq!(requests_to(&server, "/api/nginx/error/logs").await, 1);
    assert!(matches!(
        dashboard.nginx().view().table,
        TableView::Rows(ref rows) if rows.len() == 1
    ));
    dashboard.shutdown();
}

// ── Attack actions ──────────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_reloads_stats_and_logs() {
    let (server, dashboard) = setup().await;
    mount_backend(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/attacks/42/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "Attack 42 marked as resolved", "attack_id": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut phase = dashboard.attacks().subscribe_phase();
    dashboard.switch_to(Domain::Attacks);
    wait_for_phase(&mut phase, PanelPhase::Active).await;
    let logs_before = requests_to(&server, "/api/attacks/logs").await;
    let stats_before = requests_to(&server, "/api/attacks/stats").await;

    dashboard.attacks().resolve(42).await.unwrap();

    assert_eq!(requests_to(&server, "/api/attacks/logs").await, logs_before + 1);
    assert_eq!(requests_to(&server, "/api/attacks/stats").await, stats_before + 1);
    dashboard.shutdown();
}

#[tokio::test]
async fn test_failed_resolve_leaves_record_untouched() {
    let (server, dashboard) = setup().await;
    mount_backend(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/attacks/42/resolve"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Attack not found"})))
        .mount(&server)
        .await;

    let mut phase = dashboard.attacks().subscribe_phase();
    dashboard.switch_to(Domain::Attacks);
    wait_for_phase(&mut phase, PanelPhase::Active).await;
    let logs_before = requests_to(&server, "/api/attacks/logs").await;

    let err = dashboard.attacks().resolve(42).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    assert_eq!(requests_to(&server, "/api/attacks/logs").await, logs_before);
    let view = dashboard.attacks().view();
    assert!(!view.table.rows()[0].resolved);
    dashboard.shutdown();
}
