//! Proves the comparison stream is relayed live rather than buffered:
//! the client must see the first event while the upstream is still
//! holding the connection open for the next one.

use claimdesk_gateway::{build_router, AppState, GatewayConfig};
use futures::StreamExt;
use serde_json::json;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn serve(upstream_url: &str) -> SocketAddr {
    let config = GatewayConfig::new(upstream_url).expect("upstream url should be valid");
    let router = build_router(AppState::new(&config));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("gateway should bind");
    let addr = listener.local_addr().expect("gateway addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("gateway should run");
    });
    addr
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// Reads one HTTP request: headers plus a content-length body.
async fn read_request(sock: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = sock.read(&mut chunk).await.expect("request should read");
        assert!(n > 0, "client closed mid-request");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(header_end) = find(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|value| value.trim().parse::<usize>().expect("length should parse"))
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + body_len {
                return buf;
            }
        }
    }
}

async fn write_chunk(sock: &mut TcpStream, payload: &[u8]) {
    let framed = format!("{:x}\r\n", payload.len());
    sock.write_all(framed.as_bytes())
        .await
        .expect("chunk size should write");
    sock.write_all(payload).await.expect("chunk should write");
    sock.write_all(b"\r\n").await.expect("chunk end should write");
    sock.flush().await.expect("chunk should flush");
}

#[tokio::test]
async fn events_reach_the_client_before_the_upstream_finishes() {
    let upstream = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("upstream should bind");
    let upstream_addr = upstream.local_addr().expect("upstream addr");
    let (first_seen_tx, first_seen_rx) = oneshot::channel::<()>();

    // Sends one event, then holds the connection until the client
    // confirms it arrived, then sends the second and finishes.
    tokio::spawn(async move {
        let (mut sock, _) = upstream.accept().await.expect("upstream should accept");
        let request = read_request(&mut sock).await;
        let head = String::from_utf8_lossy(&request);
        assert!(head.starts_with("POST /api/v1/feature/compare_stream"));
        assert!(head.to_ascii_lowercase().contains("accept: text/event-stream"));

        sock.write_all(
            b"HTTP/1.1 200 OK\r\n\
              content-type: text/event-stream\r\n\
              transfer-encoding: chunked\r\n\r\n",
        )
        .await
        .expect("response head should write");
        write_chunk(&mut sock, b"data: first\n\n").await;
        first_seen_rx.await.expect("client should confirm the event");
        write_chunk(&mut sock, b"data: second\n\n").await;
        sock.write_all(b"0\r\n\r\n")
            .await
            .expect("terminal chunk should write");
    });

    let addr = serve(&format!("http://{upstream_addr}")).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/feature/compare_stream"))
        .json(&json!({"features": [], "compare_files": ["prior-art.txt"]}))
        .send()
        .await
        .expect("request should reach the gateway");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/event-stream")
    );

    let mut collected = String::new();
    let mut first_seen_tx = Some(first_seen_tx);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.expect("relayed chunk should arrive");
        collected.push_str(&String::from_utf8_lossy(&chunk));
        if collected.contains("data: first\n\n") {
            if let Some(tx) = first_seen_tx.take() {
                tx.send(()).expect("upstream should still be waiting");
            }
        }
    }

    assert!(collected.contains("data: first\n\n"));
    assert!(collected.contains("data: second\n\n"));
}

#[tokio::test]
async fn stream_route_relays_upstream_failure_status() {
    let upstream = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("upstream should bind");
    let upstream_addr = upstream.local_addr().expect("upstream addr");

    tokio::spawn(async move {
        let (mut sock, _) = upstream.accept().await.expect("upstream should accept");
        read_request(&mut sock).await;
        let body = br#"{"detail":"comparison backend unavailable"}"#;
        let head = format!(
            "HTTP/1.1 503 Service Unavailable\r\n\
             content-type: application/json\r\n\
             content-length: {}\r\n\r\n",
            body.len()
        );
        sock.write_all(head.as_bytes())
            .await
            .expect("response head should write");
        sock.write_all(body).await.expect("body should write");
    });

    let addr = serve(&format!("http://{upstream_addr}")).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/feature/compare_stream"))
        .json(&json!({"features": []}))
        .send()
        .await
        .expect("request should reach the gateway");

    // The status passes through while the stream content type is pinned.
    assert_eq!(response.status(), 503);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/event-stream")
    );
    assert_eq!(
        response.text().await.expect("body should read"),
        r#"{"detail":"comparison backend unavailable"}"#
    );
}
