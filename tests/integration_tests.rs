//! Integration tests using a mock GraphQL server
//!
//! Exercises full runs: page requests → mock endpoint → URL file

use async_trait::async_trait;
use hacktivity_fetch::decode::ShapeError;
use hacktivity_fetch::engine::{Fetcher, Pacer, StopReason, TokioPacer};
use hacktivity_fetch::{FetchConfig, UrlWriter};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

/// Mock clock: records each pause instead of sleeping
#[derive(Clone, Default)]
struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}

fn config(server: &MockServer) -> FetchConfig {
    FetchConfig::new().with_endpoint(server.uri())
}

fn report_url(offset: u64, i: u64) -> String {
    format!("https://hackerone.com/reports/{}", offset + i)
}

fn full_page(offset: u64, size: u64) -> Value {
    let nodes: Vec<Value> = (0..size)
        .map(|i| {
            json!({
                "__typename": "HacktivityDocument",
                "id": format!("node-{}", offset + i),
                "severity_rating": "medium",
                "report": {
                    "title": "Report",
                    "url": report_url(offset, i),
                    "__typename": "Report"
                }
            })
        })
        .collect();
    json!({"data": {"search": {"__typename": "SearchResult", "total_count": 100_000, "nodes": nodes}}})
}

fn empty_page() -> Value {
    json!({"data": {"search": {"total_count": 75, "nodes": []}}})
}

async fn mount_page(server: &MockServer, offset: u64, body: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"from": offset}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn sent_offsets(server: &MockServer) -> Vec<u64> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["variables"]["from"].as_u64().unwrap()
        })
        .collect()
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_three_pages_then_empty() {
    let server = MockServer::start().await;
    for offset in [0, 25, 50] {
        mount_page(&server, offset, full_page(offset, 25)).await;
    }
    mount_page(&server, 75, empty_page()).await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("h1reports.txt");
    let pacer = RecordingPacer::default();
    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(pacer.clone());
    let mut sink = UrlWriter::open_append(&path).unwrap();

    let summary = fetcher.run(&mut sink).await.unwrap();
    drop(sink);

    assert_eq!(summary.stop, StopReason::EmptyBatch);
    assert_eq!(summary.stats.requests_sent, 4);
    assert_eq!(summary.stats.pages_processed, 3);
    assert_eq!(summary.stats.urls_written, 75);
    assert_eq!(summary.stats.total_count, Some(75));
    assert_eq!(sent_offsets(&server).await, vec![0, 25, 50, 75]);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 75);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(*line, report_url(0, i as u64));
    }

    // one pause after each of the three non-empty pages
    assert_eq!(
        *pacer.pauses.lock().unwrap(),
        vec![Duration::from_secs(1); 3]
    );
}

#[tokio::test]
async fn test_request_body_matches_wire_format() {
    let server = MockServer::start().await;
    mount_page(&server, 0, empty_page()).await;

    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    fetcher.run(&mut sink).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["operationName"], "HacktivitySearchQuery");
    assert_eq!(
        body["variables"],
        json!({
            "queryString": "*:*",
            "size": 25,
            "from": 0,
            "sort": {"field": "disclosed_at", "direction": "DESC"},
            "product_area": "hacktivity",
            "product_feature": "overview"
        })
    );
    assert!(body["query"].as_str().unwrap().contains("search("));
}

// ============================================================================
// Pagination bounds
// ============================================================================

#[tokio::test]
async fn test_request_budget_caps_run() {
    let server = MockServer::start().await;
    // the endpoint claims far more results than the budget allows
    for offset in (0..10).map(|i| i * 25) {
        mount_page(&server, offset, full_page(offset, 25)).await;
    }

    let fetcher = Fetcher::new(&config(&server).with_max_reports(100))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.stats.total_count, Some(100_000));
    assert_eq!(sent_offsets(&server).await, vec![0, 25, 50, 75]);
    assert_eq!(sink.lines_written(), 100);
}

#[tokio::test]
async fn test_default_budget_is_two_hundred_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_page(0, 1)))
        .expect(200)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.stats.requests_sent, 200);

    let offsets = sent_offsets(&server).await;
    let expected: Vec<u64> = (0..200).map(|i| i * 25).collect();
    assert_eq!(offsets, expected);
}

#[tokio::test]
async fn test_nodes_without_url_are_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        json!({"data": {"search": {"nodes": [
            {"report": {"url": "https://hackerone.com/reports/1"}},
            {"report": {"title": "redacted"}},
            {"team": {"handle": "acme"}},
            {"report": {"url": "https://hackerone.com/reports/2"}}
        ]}}}),
    )
    .await;
    mount_page(&server, 25, empty_page()).await;

    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::EmptyBatch);
    assert_eq!(summary.stats.nodes_seen, 4);
    assert_eq!(summary.stats.nodes_skipped(), 2);
    // a page of incomplete nodes still advances the offset
    assert_eq!(sent_offsets(&server).await, vec![0, 25]);

    let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(
        written,
        "https://hackerone.com/reports/1\nhttps://hackerone.com/reports/2\n"
    );
}

// ============================================================================
// Early stops
// ============================================================================

#[tokio::test]
async fn test_empty_first_page_writes_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, 0, empty_page()).await;

    let pacer = RecordingPacer::default();
    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(pacer.clone());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::EmptyBatch);
    assert_eq!(sent_offsets(&server).await, vec![0]);
    assert!(pacer.pauses.lock().unwrap().is_empty());
    assert!(sink.into_inner().unwrap().is_empty());
}

#[tokio::test]
async fn test_shape_failure_stops_run() {
    let server = MockServer::start().await;
    mount_page(&server, 0, full_page(0, 25)).await;
    mount_page(&server, 25, json!({"data": {}})).await;
    mount_page(&server, 50, full_page(50, 25)).await;

    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(
        summary.stop,
        StopReason::InvalidShape(ShapeError::MissingSearch)
    );
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(sent_offsets(&server).await, vec![0, 25]);
    assert_eq!(sink.lines_written(), 25);
}

#[tokio::test]
async fn test_null_nodes_ends_run_as_empty_batch() {
    let server = MockServer::start().await;
    mount_page(&server, 0, full_page(0, 25)).await;
    mount_page(&server, 25, json!({"data": {"search": {"total_count": 25, "nodes": null}}})).await;

    let pacer = RecordingPacer::default();
    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(pacer.clone());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::EmptyBatch);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(sent_offsets(&server).await, vec![0, 25]);
    assert_eq!(pacer.pauses.lock().unwrap().len(), 1);
    assert_eq!(sink.lines_written(), 25);
}

#[tokio::test]
async fn test_odd_field_types_do_not_lose_urls() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        json!({"data": {"search": {"total_count": "lots", "nodes": [
            {"severity_rating": {"score": 9.8}, "report": {"url": report_url(0, 0)}},
            {"report": {"url": report_url(0, 1), "title": 42}},
            {"__typename": null, "report": {"url": report_url(0, 2), "disclosed_at": [2024]}}
        ]}}}),
    )
    .await;
    mount_page(&server, 25, empty_page()).await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("reports.txt");
    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::open_append(&path).unwrap();
    let summary = fetcher.run(&mut sink).await.unwrap();
    drop(sink);

    assert_eq!(summary.stop, StopReason::EmptyBatch);
    assert_eq!(
        read_lines(&path),
        vec![report_url(0, 0), report_url(0, 1), report_url(0, 2)]
    );
}

#[tokio::test]
async fn test_graphql_error_without_data_stops_run() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        json!({"errors": [{"message": "Rate limit exceeded"}]}),
    )
    .await;

    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::InvalidShape(ShapeError::MissingData));
}

#[tokio::test]
async fn test_server_error_is_fatal() {
    let server = MockServer::start().await;
    mount_page(&server, 0, full_page(0, 25)).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"from": 25}})))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;
    mount_page(&server, 50, full_page(50, 25)).await;

    let pacer = RecordingPacer::default();
    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(pacer.clone());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert!(summary.stop.is_failure());
    assert_eq!(summary.exit_code(), 1);
    match &summary.stop {
        StopReason::TransportFailure { status, .. } => assert_eq!(*status, Some(500)),
        other => panic!("Expected TransportFailure, got {other:?}"),
    }
    // no retry, no continuation past the failed page
    assert_eq!(sent_offsets(&server).await, vec![0, 25]);
    assert_eq!(pacer.pauses.lock().unwrap().len(), 1);
    assert_eq!(sink.lines_written(), 25);
}

#[tokio::test]
async fn test_malformed_json_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": {\"search\""))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert!(summary.stop.is_failure());
    assert_eq!(sink.lines_written(), 0);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_fatal() {
    // bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let endpoint = format!("http://127.0.0.1:{port}/graphql");
    let fetcher = Fetcher::new(&FetchConfig::new().with_endpoint(endpoint))
        .unwrap()
        .with_pacer(RecordingPacer::default());
    let mut sink = UrlWriter::from_writer(Vec::new());
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert!(summary.stop.is_failure());
    assert_eq!(summary.stats.requests_sent, 1);
}

// ============================================================================
// Sink behaviour
// ============================================================================

#[tokio::test]
async fn test_second_run_duplicates_urls() {
    let server = MockServer::start().await;
    mount_page(&server, 0, full_page(0, 3)).await;
    mount_page(&server, 25, empty_page()).await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("h1reports.txt");
    let fetcher = Fetcher::new(&config(&server))
        .unwrap()
        .with_pacer(RecordingPacer::default());

    for _ in 0..2 {
        let mut sink = UrlWriter::open_append(&path).unwrap();
        fetcher.run(&mut sink).await.unwrap();
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[..3], lines[3..]);
}

// ============================================================================
// Pacing
// ============================================================================

#[tokio::test]
async fn test_real_pacer_spaces_requests() {
    let server = MockServer::start().await;
    mount_page(&server, 0, full_page(0, 1)).await;
    mount_page(&server, 25, full_page(25, 1)).await;
    mount_page(&server, 50, empty_page()).await;

    let config = config(&server).with_delay_seconds(0.1);
    let fetcher = Fetcher::new(&config).unwrap().with_pacer(TokioPacer);
    let mut sink = UrlWriter::from_writer(Vec::new());

    let start = Instant::now();
    let summary = fetcher.run(&mut sink).await.unwrap();

    assert_eq!(summary.stop, StopReason::EmptyBatch);
    assert!(start.elapsed() >= Duration::from_millis(200));
}
