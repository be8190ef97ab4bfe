// ═══════════════════════════════════════════════════════════════════
// Fetch Tests — HttpFetcher against a local one-shot HTTP responder
// ═══════════════════════════════════════════════════════════════════

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use gridview_core::errors::CoreError;
use gridview_core::fetch::cache::ResponseCache;
use gridview_core::fetch::http::HttpFetcher;
use gridview_core::fetch::traits::JsonFetcher;
use gridview_core::models::price::PricePoint;
use gridview_core::models::spending::{SpendingData, SpendingQuery};
use gridview_core::sources::http::HttpDataSource;
use gridview_core::sources::traits::DataSource;

/// Serve exactly one canned HTTP response on an ephemeral port.
/// Returns the origin plus a handle to the captured request line.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, Arc<Mutex<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let request_line = Arc::new(Mutex::new(String::new()));
    let captured = Arc::clone(&request_line);

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let mut total = 0;
            loop {
                match socket.read(&mut buf[total..]).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        total += n;
                        if buf[..total].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                        if total == buf.len() {
                            break;
                        }
                    }
                }
            }
            let request = String::from_utf8_lossy(&buf[..total]);
            if let Some(line) = request.lines().next() {
                *captured.lock().unwrap() = line.to_string();
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), request_line)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn success_resolves_to_json_body() {
    let (origin, _) = serve_once("200 OK", r#"{ "ok": true, "count": 3 }"#).await;
    let fetcher = HttpFetcher::new();

    let value = fetcher.fetch_json(&origin).await.unwrap();
    assert_eq!(value, json!({ "ok": true, "count": 3 }));
}

#[tokio::test]
async fn status_404_rejects_with_status_and_body() {
    let (origin, _) = serve_once("404 Not Found", "no such consumer").await;
    let fetcher = HttpFetcher::new();

    let error = fetcher.fetch_json(&origin).await.unwrap_err();
    match error {
        CoreError::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such consumer");
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn status_500_rejects_regardless_of_body_content() {
    let (origin, _) = serve_once("500 Internal Server Error", r#"{ "ok": true }"#).await;
    let fetcher = HttpFetcher::new();

    let error = fetcher.fetch_json(&origin).await.unwrap_err();
    assert_eq!(error.status(), Some(500));
}

#[tokio::test]
async fn invalid_json_on_success_rejects_with_parse() {
    let (origin, _) = serve_once("200 OK", "<html>not json</html>").await;
    let fetcher = HttpFetcher::new();

    let error = fetcher.fetch_json(&origin).await.unwrap_err();
    match error {
        CoreError::Parse(_) => {}
        other => panic!("Expected Parse, got {:?}", other),
    }
}

#[tokio::test]
async fn connection_refused_is_transport() {
    // Grab a port that nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2));
    let error = fetcher.fetch_json(&format!("http://{addr}")).await.unwrap_err();
    match error {
        CoreError::Transport(_) => {}
        other => panic!("Expected Transport, got {:?}", other),
    }
}

/// End to end: `spending` for 2024-01-01 and consumer 42 hits
/// `/consumer/spending?start_date=2024-01-01&consumer_id=42` and resolves to
/// exactly the decoded payload.
#[tokio::test]
async fn spending_request_round_trip() {
    let body = r#"{"start_date":"2024-01-01","spending":[{"date":"2024-01-01","amount":12.5}]}"#;
    let (origin, request_line) = serve_once("200 OK", body).await;

    let cache = ResponseCache::new(Duration::from_secs(30));
    let fetcher: Arc<dyn JsonFetcher> = Arc::new(HttpFetcher::new());
    let source = HttpDataSource::new(origin, cache, fetcher);

    let query = SpendingQuery::new(d(2024, 1, 1)).with_consumer_id(42);
    let data = source.spending(&query).await.unwrap();

    assert_eq!(
        request_line.lock().unwrap().as_str(),
        "GET /consumer/spending?start_date=2024-01-01&consumer_id=42 HTTP/1.1"
    );
    assert_eq!(
        data,
        SpendingData {
            start_date: d(2024, 1, 1),
            end_date: None,
            consumer_id: None,
            spending: vec![PricePoint {
                date: d(2024, 1, 1),
                amount: 12.5
            }],
        }
    );
}
