// tests/scanner_test.rs

//! End-to-end scans against local mock targets.

use recon_probe::api::{handle_scan_json, handle_scan_request, ScanRequest};
use recon_probe::config::ScanConfig;
use recon_probe::core::error::ScanError;
use recon_probe::core::models::{PortReport, PortStatus, ProbeStatus, ScanTarget};
use recon_probe::core::scanner::{run_full_scan, Scanner};
use tokio::net::TcpListener;
use wiremock::{
    matchers::{any, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const XSS: &str = "<script>alert('XSS')</script>";
const SQLI: &str = "' OR '1'='1";

fn http_only_config() -> ScanConfig {
    ScanConfig {
        ports: vec![],
        http_timeout_secs: 5,
        tls_timeout_secs: 1,
        port_timeout_secs: 1,
        ..Default::default()
    }
}

fn scanner() -> Scanner {
    Scanner::new(http_only_config()).unwrap()
}

fn target(server: &MockServer) -> ScanTarget {
    ScanTarget::parse(&server.uri()).unwrap()
}

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_xss_verbatim_reflection_is_indicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("test", XSS))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("<p>Results for {}</p>", XSS)))
        .mount(&server)
        .await;

    let report = scanner().scan(&target(&server)).await;
    assert!(report.xss_vulnerable);
    assert!(!report.sql_injection_vulnerable);
}

#[tokio::test]
async fn test_xss_escaped_reflection_is_not_indicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("test", XSS))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<p>Results for &lt;script&gt;alert('XSS')&lt;/script&gt;</p>",
        ))
        .mount(&server)
        .await;

    let report = scanner().scan(&target(&server)).await;
    assert!(!report.xss_vulnerable);
}

#[tokio::test]
async fn test_sqli_marker_counts_regardless_of_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("test", SQLI))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal error: database unavailable"))
        .mount(&server)
        .await;

    let report = scanner().scan(&target(&server)).await;
    assert!(report.sql_injection_vulnerable);
    assert!(!report.xss_vulnerable);
}

#[tokio::test]
async fn test_sqli_error_text_is_indicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("test", SQLI))
        .respond_with(ResponseTemplate::new(200).set_body_string("SQL error: syntax error near 'OR'"))
        .mount(&server)
        .await;

    let report = scanner().scan(&target(&server)).await;
    assert!(report.sql_injection_vulnerable);
}

#[tokio::test]
async fn test_missing_headers_in_fixed_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let report = scanner().scan(&target(&server)).await;
    assert_eq!(
        report.missing_headers,
        vec!["Missing Content-Security-Policy", "Missing Strict-Transport-Security"]
    );
}

#[tokio::test]
async fn test_present_headers_are_not_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Security-Policy", "default-src 'self'")
                .insert_header("Strict-Transport-Security", "max-age=31536000"),
        )
        .mount(&server)
        .await;

    let report = scanner().scan(&target(&server)).await;
    assert!(report.missing_headers.is_empty());
}

#[tokio::test]
async fn test_port_order_follows_configuration() {
    let server = MockServer::start().await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let closed = closed_port().await;

    let config = ScanConfig { ports: vec![open, closed], ..http_only_config() };
    let report = Scanner::new(config).unwrap().scan(&target(&server)).await;

    assert_eq!(
        report.open_ports,
        vec![
            PortReport { port: open, status: PortStatus::Open },
            PortReport { port: closed, status: PortStatus::Closed },
        ]
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["openPorts"][0], serde_json::json!({ "port": open, "status": "open" }));
    assert_eq!(json["openPorts"][1], serde_json::json!({ "port": closed, "status": "closed" }));
}

#[tokio::test]
async fn test_plain_http_target_skips_tls_without_affecting_http_probes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("test", XSS))
        .respond_with(ResponseTemplate::new(200).set_body_string(XSS))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("test", SQLI))
        .respond_with(ResponseTemplate::new(200).set_body_string("database"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("Strict-Transport-Security", "max-age=60"))
        .mount(&server)
        .await;

    let outcome = scanner().scan_detailed(&target(&server)).await;
    assert!(!outcome.report.ssl_valid);
    assert!(outcome.report.xss_vulnerable);
    assert!(outcome.report.sql_injection_vulnerable);
    assert_eq!(outcome.report.missing_headers, vec!["Missing Content-Security-Policy"]);
    assert_eq!(outcome.diagnostics.headers, ProbeStatus::Succeeded);
    assert_eq!(outcome.diagnostics.tls, ProbeStatus::Succeeded);
}

#[tokio::test]
async fn test_unreachable_target_yields_negative_report() {
    let port = closed_port().await;
    let config = ScanConfig { ports: vec![port], ..http_only_config() };
    let target = ScanTarget::parse(&format!("https://127.0.0.1:{}", port)).unwrap();

    let outcome = Scanner::new(config).unwrap().scan_detailed(&target).await;
    let report = &outcome.report;
    assert!(!report.ssl_valid && !report.xss_vulnerable && !report.sql_injection_vulnerable);
    assert!(report.missing_headers.is_empty());
    assert_eq!(report.open_ports, vec![PortReport { port, status: PortStatus::Closed }]);

    assert_ne!(outcome.diagnostics.tls, ProbeStatus::Succeeded);
    assert_ne!(outcome.diagnostics.xss, ProbeStatus::Succeeded);
    assert_ne!(outcome.diagnostics.headers, ProbeStatus::Succeeded);
    assert!(!outcome.diagnostics.all_succeeded());
}

#[tokio::test]
async fn test_repeated_scans_are_identical() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("static page"))
        .mount(&server)
        .await;

    let scanner = scanner();
    let first = scanner.scan(&target(&server)).await;
    let second = scanner.scan(&target(&server)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_malformed_targets_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let host_only = server.address().to_string();
    for raw in ["", "   ", host_only.as_str(), "not a url", "ftp://127.0.0.1/"] {
        let err = run_full_scan(raw, http_only_config()).await.unwrap_err();
        assert_eq!(err.status_code(), 400, "accepted {:?}", raw);
    }

    let response = handle_scan_json(&scanner(), &format!(r#"{{"url": "{}"}}"#, host_only)).await;
    assert_eq!(response.status, 400);

    let response = handle_scan_json(&scanner(), r#"{}"#).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["error"], "URL is required");

    assert!(matches!(run_full_scan("", http_only_config()).await, Err(ScanError::EmptyTarget)));
}

#[tokio::test]
async fn test_api_success_matches_wire_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let response = handle_scan_request(&scanner(), ScanRequest { url: Some(server.uri()) }).await;
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        serde_json::json!({
            "sslValid": false,
            "xssVulnerable": false,
            "sqlInjectionVulnerable": false,
            "missingHeaders": ["Missing Content-Security-Policy", "Missing Strict-Transport-Security"],
            "openPorts": []
        })
    );
}
