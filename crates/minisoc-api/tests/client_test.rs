#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use reqwest::header::{HeaderName, HeaderValue};
use wiremock::matchers::{
    body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use minisoc_api::{
    ApiClient, AttackFilter, Error, ErrorLevel, ErrorLogFilter, Page, RequestOptions, Severity,
    SshLogFilter, SshStatus, TimelineInterval,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

const FIRST_PAGE: Page = Page {
    limit: 50,
    offset: 0,
};

// ── Generic request ─────────────────────────────────────────────────

#[tokio::test]
async fn test_request_defaults_to_get() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ssh/stats"))
        .and(query_param("hours", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_attempts": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client
        .request("/ssh/stats", RequestOptions::get().with_query("hours", 24))
        .await
        .unwrap();
    assert_eq!(value["total_attempts"], 3);
}

#[tokio::test]
async fn test_request_sends_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/attacks/1/resolve"))
        .and(body_json(json!({"note": "triaged"})))
        .and(header("x-request-source", "minisoc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let value = client
        .request(
            "attacks/1/resolve",
            RequestOptions::post()
                .with_body(json!({"note": "triaged"}))
                .with_header(
                    HeaderName::from_static("x-request-source"),
                    HeaderValue::from_static("minisoc"),
                ),
        )
        .await
        .unwrap();
    assert_eq!(value["success"], true);
}

#[tokio::test]
async fn test_non_2xx_maps_to_http_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/nginx/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.nginx_stats(24).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HttpStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_maps_to_decode() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/attacks/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client.attack_summary(24).await;
    assert!(
        matches!(result, Err(Error::Decode { ref body, .. }) if body.contains("gateway")),
        "expected Decode error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_network() {
    // Bind an ephemeral port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    let result = client.probe().await;
    assert!(
        matches!(result, Err(Error::Network(_))),
        "expected Network error, got: {result:?}"
    );
}

// ── SSH ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_requests_one_hour_window() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ssh/stats"))
        .and(query_param("hours", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_attempts": 0, "successful": 0, "failed": 0, "suspicious": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.probe().await.unwrap();
}

#[tokio::test]
async fn test_ssh_logs_sends_paging_and_set_filters_only() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ssh/logs"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "100"))
        .and(query_param("status", "failed"))
        .and(query_param_is_missing("suspicious_only"))
        .and(query_param_is_missing("username"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 101,
            "limit": 50,
            "offset": 100,
            "logs": [{
                "id": 9,
                "timestamp": "2024-05-01T10:00:00",
                "username": "root",
                "ip_address": "203.0.113.7",
                "status": "failed",
                "is_suspicious": true
            }]
        })))
        .mount(&server)
        .await;

    let filter = SshLogFilter {
        status: Some(SshStatus::Failed),
        ..SshLogFilter::default()
    };
    let page = client
        .ssh_logs(
            Page {
                limit: 50,
                offset: 100,
            },
            &filter,
        )
        .await
        .unwrap();

    assert_eq!(page.total, Some(101));
    assert_eq!(page.logs.len(), 1);
    assert_eq!(page.logs[0].status, SshStatus::Failed);
    assert!(page.logs[0].is_suspicious);
}

#[tokio::test]
async fn test_ssh_logs_suspicious_only_flag() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ssh/logs"))
        .and(query_param("suspicious_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let filter = SshLogFilter {
        suspicious_only: true,
        ..SshLogFilter::default()
    };
    let page = client.ssh_logs(FIRST_PAGE, &filter).await.unwrap();
    assert!(page.logs.is_empty());
    assert_eq!(page.total, None);
}

#[tokio::test]
async fn test_ssh_timeline() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ssh/timeline"))
        .and(query_param("hours", "24"))
        .and(query_param("interval", "hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "interval": "hour",
            "data": [
                {"time": "2024-05-01T10:00:00", "status": "failed", "count": 4},
                {"time": "2024-05-01T10:00:00", "status": "success", "count": 1}
            ]
        })))
        .mount(&server)
        .await;

    let timeline = client
        .ssh_timeline(24, TimelineInterval::Hour)
        .await
        .unwrap();
    assert_eq!(timeline.interval, "hour");
    assert_eq!(timeline.data.len(), 2);
}

// ── nginx ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_nginx_stats_decodes_access_block() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/nginx/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": {
                "total_requests": 1200,
                "avg_response_time": 0.042,
                "top_paths": [{"path": "/login", "count": 40}],
                "status_distribution": [{"status": 200, "count": 1000}, {"status": 404, "count": 200}]
            }
        })))
        .mount(&server)
        .await;

    let stats = client.nginx_stats(24).await.unwrap();
    assert_eq!(stats.access.total_requests, 1200);
    assert_eq!(stats.access.top_paths[0].path, "/login");
    assert_eq!(stats.access.status_distribution.len(), 2);
}

#[tokio::test]
async fn test_nginx_error_logs_level_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/nginx/error/logs"))
        .and(query_param("level", "crit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [{
                "timestamp": "2024-05-01T10:00:00",
                "level": "crit",
                "message": "upstream timed out",
                "client_ip": "198.51.100.4"
            }]
        })))
        .mount(&server)
        .await;

    let filter = ErrorLogFilter {
        level: Some(ErrorLevel::Crit),
    };
    let page = client.nginx_error_logs(FIRST_PAGE, &filter).await.unwrap();
    assert_eq!(page.logs[0].level, ErrorLevel::Crit);
    assert_eq!(page.logs[0].message, "upstream timed out");
}

// ── Attacks ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_attack_logs_unresolved_maps_to_resolved_only() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/attacks/logs"))
        .and(query_param("resolved_only", "true"))
        .and(query_param("severity", "CRITICAL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "attacks": [{
                "id": 42,
                "timestamp": "2024-05-01T10:00:00",
                "attack_type": "sql_injection",
                "severity": "CRITICAL",
                "description": "UNION SELECT in query",
                "source_ip": "192.0.2.10",
                "target_path": "/search",
                "resolved": false,
                "blocked": false
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = AttackFilter {
        severity: Some(Severity::Critical),
        unresolved_only: true,
        ..AttackFilter::default()
    };
    let page = client.attack_logs(FIRST_PAGE, &filter).await.unwrap();
    assert_eq!(page.attacks.len(), 1);
    assert_eq!(page.attacks[0].id, 42);
    assert!(!page.attacks[0].resolved);
}

#[tokio::test]
async fn test_attack_types() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/attacks/types"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"attack_types": ["xss", "path_traversal"]})),
        )
        .mount(&server)
        .await;

    let types = client.attack_types().await.unwrap();
    assert_eq!(types, vec!["xss".to_owned(), "path_traversal".to_owned()]);
}

#[tokio::test]
async fn test_resolve_accepts_empty_2xx() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/attacks/42/resolve"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.resolve_attack(42).await.unwrap();
}

#[tokio::test]
async fn test_block_failure_surfaces_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/attacks/7/block"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Attack not found"})))
        .mount(&server)
        .await;

    let result = client.block_attack(7).await;
    assert!(
        matches!(result, Err(ref e) if e.is_not_found()),
        "expected 404, got: {result:?}"
    );
}
