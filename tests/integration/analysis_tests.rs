//! Integration tests for the analyzer
//!
//! These tests use wiremock to stand in for the Cosense API and drive the
//! HTTP page store and the full analysis pipeline end-to-end.

use cosense_ranker::config::{Config, RunContext, RunOptions};
use cosense_ranker::store::{PageFailure, PageResponse, PageStore};
use cosense_ranker::{Analyzer, CosenseClient, RankerError, RunOutcome};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 5;
    config.rate_limit.fetch_delay_ms = 0;
    config.rate_limit.check_delay_ms = 0;
    config.output.report_path = dir.path().join("result.txt").display().to_string();
    config
}

fn page_json(title: &str, lines: &[&str], links: &[&str]) -> Value {
    let mut all = vec![title];
    all.extend_from_slice(lines);
    json!({
        "title": title,
        "lines": all.iter().map(|text| json!({ "text": text })).collect::<Vec<_>>(),
        "links": links,
    })
}

async fn mount_page(server: &MockServer, api_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, api_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Hub linking to A, B (missing) and "C page"
async fn mount_scenario(server: &MockServer) {
    mount_page(
        server,
        "/pages/proj/Hub",
        page_json("Hub", &["[A] [B] [C page]"], &["A", "B", "C page"]),
    )
    .await;
    mount_page(
        server,
        "/pages/proj/A",
        page_json("A", &["[x.icon] agreed [x.icon]", "[y.icon]"], &[]),
    )
    .await;
    mount_status(server, "/pages/proj/B", 404, "").await;
    mount_page(
        server,
        "/pages/proj/C_page",
        page_json("C page", &["[y.icon] nice"], &[]),
    )
    .await;
}

fn context(options: RunOptions) -> RunContext {
    RunContext::new(Some("proj/Hub"), options).expect("valid page spec")
}

#[tokio::test]
async fn test_ranking_run_end_to_end() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();
    let ctx = context(RunOptions::default());
    let mut out = Vec::new();

    let outcome = Analyzer::new(&client, &config, &ctx)
        .run(&mut out)
        .await
        .expect("run should succeed");

    let report = match outcome {
        RunOutcome::Ranking(report) => report,
        other => panic!("expected a ranking, got {:?}", other),
    };
    assert_eq!(report.stats.total_pages, 3);
    assert_eq!(report.stats.success_pages, 2);
    assert_eq!(report.stats.total_comments, 4);
    assert_eq!(report.stats.success_rate, 66.7);
    assert_eq!(report.entries[0].username, "x");
    assert_eq!(report.entries[1].username, "y");
    assert_eq!(report.failed_pages, vec!["B".to_string()]);

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("📖 Accessing 'proj' in public mode..."));
    assert!(console.contains("🏆 Commenter Ranking:"));
    assert!(console.contains("⚠️ Failed pages: 1"));

    let saved = std::fs::read_to_string(dir.path().join("result.txt")).unwrap();
    assert!(saved.contains("# Hub page: proj/Hub"));
    assert!(saved.contains(" 1. x"));
    assert!(!saved.contains("⚠️ Failed pages"));

    let converted = cosense_ranker::output::parse_ranking(&saved).unwrap();
    assert_eq!(converted.len(), 2);
    assert_eq!(converted[0].comments, 2);
}

#[tokio::test]
async fn test_session_cookie_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/private/Hub"))
        .and(header("cookie", "connect.sid=s%3Asecret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("Hub", &[], &[])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, Some("s%3Asecret")).unwrap();
    let ctx = RunContext::new(Some("private/Hub"), RunOptions::default()).unwrap();
    let mut out = Vec::new();

    let outcome = Analyzer::new(&client, &config, &ctx)
        .run(&mut out)
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::NoLinks));
    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("🔐 Accessing 'private' in authenticated mode..."));
    assert!(console.contains("contains no links"));
}

#[tokio::test]
async fn test_hub_unauthorized_is_fatal() {
    let server = MockServer::start().await;
    mount_status(&server, "/pages/proj/Hub", 401, "").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let ctx = context(RunOptions::default());

    let anonymous = CosenseClient::new(&config.api, None).unwrap();
    let result = Analyzer::new(&anonymous, &config, &ctx)
        .run(&mut Vec::<u8>::new())
        .await;
    assert!(matches!(
        result,
        Err(RankerError::HubFetch {
            failure: PageFailure::AuthRequired,
            ..
        })
    ));

    let with_session = CosenseClient::new(&config.api, Some("stale")).unwrap();
    let result = Analyzer::new(&with_session, &config, &ctx)
        .run(&mut Vec::<u8>::new())
        .await;
    assert!(matches!(
        result,
        Err(RankerError::HubFetch {
            failure: PageFailure::AuthExpired,
            ..
        })
    ));
    assert!(!dir.path().join("result.txt").exists());
}

#[tokio::test]
async fn test_hub_server_error_keeps_body() {
    let server = MockServer::start().await;
    mount_status(&server, "/pages/proj/Hub", 500, "upstream exploded").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();
    let ctx = context(RunOptions::default());

    let result = Analyzer::new(&client, &config, &ctx)
        .run(&mut Vec::<u8>::new())
        .await;

    match result {
        Err(RankerError::HubFetch {
            failure: PageFailure::OtherHttpStatus { status_code, body },
            ..
        }) => {
            assert_eq!(status_code, 500);
            assert_eq!(body.as_deref(), Some("upstream exploded"));
        }
        other => panic!("expected a hub fetch failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hub_without_links_field_is_fatal() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/pages/proj/Hub",
        json!({ "title": "Hub", "lines": [{ "text": "Hub" }] }),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();
    let ctx = context(RunOptions::default());

    let result = Analyzer::new(&client, &config, &ctx)
        .run(&mut Vec::<u8>::new())
        .await;
    assert!(matches!(result, Err(RankerError::MissingLinksField { .. })));
}

#[tokio::test]
async fn test_malformed_link_page_is_a_failure() {
    let server = MockServer::start().await;
    mount_page(&server, "/pages/proj/Hub", page_json("Hub", &[], &["A", "Bad"])).await;
    mount_page(&server, "/pages/proj/A", page_json("A", &["[x.icon]"], &[])).await;
    mount_status(&server, "/pages/proj/Bad", 200, "<html>not json</html>").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();
    let ctx = context(RunOptions::default());

    let outcome = Analyzer::new(&client, &config, &ctx)
        .run(&mut Vec::<u8>::new())
        .await
        .unwrap();

    match outcome {
        RunOutcome::Ranking(report) => {
            assert_eq!(report.stats.total_pages, 2);
            assert_eq!(report.stats.failed_pages, 1);
            assert_eq!(report.failed_pages, vec!["Bad".to_string()]);
        }
        other => panic!("expected a ranking, got {:?}", other),
    }
}

#[tokio::test]
async fn test_user_detail_over_http() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();
    let ctx = context(RunOptions {
        username: Some("x".to_string()),
        ..RunOptions::default()
    });
    let mut out = Vec::new();

    let outcome = Analyzer::new(&client, &config, &ctx)
        .run(&mut out)
        .await
        .unwrap();

    match outcome {
        RunOutcome::UserDetail(breakdown) => {
            assert_eq!(breakdown.total, 2);
            assert_eq!(breakdown.pages.len(), 2);
            assert_eq!(breakdown.pages[1].position, 3);
        }
        other => panic!("expected a breakdown, got {:?}", other),
    }

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("\t\tL2: [x.icon] agreed [x.icon]"));
    assert!(console.contains("(2 occurrences)"));
    assert!(console.contains("📊 Total: comments by x = 2"));
    assert!(!dir.path().join("result.txt").exists());
}

#[tokio::test]
async fn test_check_links_over_http() {
    let server = MockServer::start().await;
    let long: Vec<String> = (0..149).map(|i| format!("line {}", i)).collect();
    let long_refs: Vec<&str> = long.iter().map(String::as_str).collect();

    mount_page(
        &server,
        "/pages/proj/Hub",
        page_json("Hub", &[], &["Good", "Typo", "Gone"]),
    )
    .await;
    mount_page(&server, "/pages/proj/Good", page_json("Good", &long_refs, &[])).await;
    mount_page(&server, "/pages/proj/Typo", page_json("Typo", &[], &[])).await;
    mount_status(&server, "/pages/proj/Gone", 404, "").await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();
    let ctx = context(RunOptions {
        check_links: true,
        ..RunOptions::default()
    });
    let mut out = Vec::new();

    let outcome = Analyzer::new(&client, &config, &ctx)
        .run(&mut out)
        .await
        .unwrap();

    match outcome {
        RunOutcome::LinkCheck(report) => {
            assert_eq!(report.total(), 3);
            assert_eq!(report.valid, 1);
            assert_eq!(report.invalid, 2);
        }
        other => panic!("expected a link check, got {:?}", other),
    }

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("\t→ ✅ OK (150 lines)"));
    assert!(console.contains("\t→ ⚠️  EMPTY (title only - wrong URL?)"));
    assert!(console.contains("\t→ ❌ ERROR (404)"));
    assert!(console.contains(&format!("\tURL: {}/pages/proj/Good", server.uri())));
    assert!(console.contains("Success rate: 33.3%"));
}

#[tokio::test]
async fn test_client_classifies_connection_failure() {
    // port 1 is reserved and refuses connections
    let uri = "http://127.0.0.1:1";

    let dir = TempDir::new().unwrap();
    let config = create_test_config(uri, &dir);
    let client = CosenseClient::new(&config.api, None).unwrap();

    let response = client.fetch("proj", "Hub").await;
    assert!(matches!(response, PageResponse::NetworkError { .. }));
}
