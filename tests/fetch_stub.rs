//! End-to-end fetch tests against a loopback stub elevation server.
//!
//! The stub answers every request with a canned HTTP response, so these tests
//! exercise the full path (CLI parsing, request building, JSON decoding, row
//! formatting, report accounting) without touching the network.

use std::net::SocketAddr;
use std::path::Path;

use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use depth_finder::{run_fetch, Config};

const OK_BODY: &str = r#"{
    "results": [
        {
            "elevation": 42.5,
            "location": { "lat": 10.0, "lng": 20.0 },
            "resolution": 76.35
        }
    ],
    "status": "OK"
}"#;

/// Starts a stub server answering every request with the given response.
async fn start_stub_server(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                // Drain the request head before answering
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn config_for(base: &Path, addr: SocketAddr) -> Config {
    let endpoint = format!("http://{addr}/elevation");
    Config::parse_from([
        "depth_finder",
        base.to_str().expect("utf-8 test path"),
        "test-key",
        "--endpoint",
        endpoint.as_str(),
        "--pace-ms",
        "0",
        "--verbosity",
        "0",
    ])
}

#[tokio::test]
async fn test_single_row_is_augmented_with_elevation() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("track");
    std::fs::write(base.with_extension("txt"), "10.0,20.0,20240101,12:00:00\n").unwrap();

    let addr = start_stub_server("200 OK", OK_BODY).await;
    let report = run_fetch(config_for(&base, addr)).await.unwrap();

    assert_eq!(report.total_rows, 1);
    assert_eq!(report.successful, 1);
    assert_eq!(report.failed, 0);

    let output = std::fs::read_to_string(report.output_path).unwrap();
    assert_eq!(output, "10.0,20.0,20240101,12:00:00,42.5\n");
}

#[tokio::test]
async fn test_failing_lookup_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("track");
    std::fs::write(base.with_extension("txt"), "10.0,20.0,20240101,12:00:00\n").unwrap();

    let addr = start_stub_server("500 Internal Server Error", "{}").await;
    let report = run_fetch(config_for(&base, addr)).await.unwrap();

    assert_eq!(report.total_rows, 1);
    assert_eq!(report.successful, 0);
    assert_eq!(report.failed, 1);

    let output = std::fs::read_to_string(report.output_path).unwrap();
    assert_eq!(output, "");
}

#[tokio::test]
async fn test_malformed_row_is_counted_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("track");
    std::fs::write(
        base.with_extension("txt"),
        "not-a-track-row\n10.0,20.0,20240101,12:00:00\n\n",
    )
    .unwrap();

    let addr = start_stub_server("200 OK", OK_BODY).await;
    let report = run_fetch(config_for(&base, addr)).await.unwrap();

    // Blank line ignored, malformed row skipped, good row fetched
    assert_eq!(report.total_rows, 2);
    assert_eq!(report.successful, 1);
    assert_eq!(report.failed, 1);

    let output = std::fs::read_to_string(report.output_path).unwrap();
    assert_eq!(output, "10.0,20.0,20240101,12:00:00,42.5\n");
}

#[tokio::test]
async fn test_empty_results_counts_as_row_failure() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("track");
    std::fs::write(base.with_extension("txt"), "10.0,20.0,20240101,12:00:00\n").unwrap();

    let addr = start_stub_server("200 OK", r#"{"results": [], "status": "OK"}"#).await;
    let report = run_fetch(config_for(&base, addr)).await.unwrap();

    assert_eq!(report.successful, 0);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("no-such-track");

    let addr = start_stub_server("200 OK", OK_BODY).await;
    let result = run_fetch(config_for(&base, addr)).await;

    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(
        message.contains("failed to open input file"),
        "unexpected error: {message}"
    );
}

#[tokio::test]
async fn test_missing_api_key_is_an_error() {
    std::env::remove_var("ELEVATION_API_KEY");
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("track");
    std::fs::write(base.with_extension("txt"), "10.0,20.0,20240101,12:00:00\n").unwrap();

    let config = Config::parse_from(["depth_finder", base.to_str().unwrap()]);
    let result = run_fetch(config).await;

    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("no API key"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_output_overwrites_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("track");
    std::fs::write(base.with_extension("txt"), "10.0,20.0,20240101,12:00:00\n").unwrap();
    std::fs::write(dir.path().join("track_depth.txt"), "stale contents\n").unwrap();

    let addr = start_stub_server("200 OK", OK_BODY).await;
    let report = run_fetch(config_for(&base, addr)).await.unwrap();

    let output = std::fs::read_to_string(report.output_path).unwrap();
    assert_eq!(output, "10.0,20.0,20240101,12:00:00,42.5\n");
}
