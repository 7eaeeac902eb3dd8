//! Integration tests for the HTTP transport and the cache on top of it.
//!
//! These tests start a canned HTTP server on a loopback port and point an
//! `HttpTransport` at it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use overview_cache::{
    CredentialStore, ExecutionContext, HttpTransport, MemoryCredentialStore,
    OverviewCacheBuilder, OverviewTransport, Platform, TransportError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const OVERVIEW_BODY: &str = r#"{
    "status": "success",
    "message": "Overview loaded",
    "data": {
        "userCounts": {"whatsapp": 3, "slack": 25, "teams": 8},
        "integrationStatus": {"whatsapp": "connected", "slack": "connected", "teams": "disconnected"},
        "tokenUsage": {
            "today": {"messages": 1500, "tokens": 42000, "cost": 1.25},
            "allTime": {"messages": 98000, "tokens": 3100000, "cost": 87.5}
        },
        "integrationDetails": {"whatsapp": {"phoneNumber": "+15550100"}}
    }
}"#;

struct CannedServer {
    endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Serve a JSON response with the given status line and body.
async fn serve(status_line: &'static str, body: &'static str) -> CannedServer {
    serve_raw(format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    ))
    .await
}

/// Write the same raw bytes to every connection and record the request heads.
async fn serve_raw(response: String) -> CannedServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            recorded
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&head).to_string());

            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    CannedServer {
        endpoint: format!("http://{addr}/api/dashboard/overview"),
        requests,
    }
}

fn transport(server: &CannedServer) -> HttpTransport {
    HttpTransport::with_endpoint(server.endpoint.clone(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_success_envelope_is_decoded() {
    let server = serve("200 OK", OVERVIEW_BODY).await;

    let response = transport(&server).fetch_overview(None).await.unwrap();

    assert!(response.is_success());
    let data = response.data.unwrap();
    assert_eq!(data.user_count(Platform::Slack), 25);
    assert!(data.is_connected(Platform::WhatsApp));
    assert_eq!(data.token_usage.all_time.messages, 98000);
    assert_eq!(
        data.details(Platform::WhatsApp).unwrap()["phoneNumber"],
        "+15550100"
    );
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = serve("200 OK", OVERVIEW_BODY).await;

    transport(&server)
        .fetch_overview(Some("abc123"))
        .await
        .unwrap();

    let requests = server.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let head = requests[0].to_lowercase();
    assert!(head.starts_with("get /api/dashboard/overview"));
    assert!(head.contains("authorization: bearer abc123"));
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = serve("200 OK", OVERVIEW_BODY).await;

    transport(&server).fetch_overview(None).await.unwrap();

    let requests = server.requests.lock().unwrap();
    assert!(!requests[0].to_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn test_401_body_becomes_response_error() {
    let server = serve(
        "401 Unauthorized",
        r#"{"status":"error","message":"Token expired"}"#,
    )
    .await;

    let err = transport(&server).fetch_overview(Some("old")).await.unwrap_err();

    match err {
        TransportError::Response { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Token expired"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    let server = serve_raw(
        "HTTP/1.1 500 Internal Server Error\r\ncontent-type: application/json\r\ncontent-length: 200\r\nconnection: close\r\n\r\n{\"message\":"
            .to_string(),
    )
    .await;

    let err = transport(&server).fetch_overview(None).await.unwrap_err();

    match err {
        TransportError::Response { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = serve("200 OK", "not json").await;

    let err = transport(&server).fetch_overview(None).await.unwrap_err();

    assert!(matches!(err, TransportError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport =
        HttpTransport::with_endpoint(format!("http://{addr}/overview"), Duration::from_secs(2))
            .unwrap();
    let err = transport.fetch_overview(None).await.unwrap_err();

    assert!(matches!(err, TransportError::Network { .. }));
}

#[tokio::test]
async fn test_cache_over_http_end_to_end() {
    let server = serve("200 OK", OVERVIEW_BODY).await;
    let credentials = Arc::new(MemoryCredentialStore::with_tokens(Some("abc123"), None));
    let cache = OverviewCacheBuilder::new(Arc::new(transport(&server)))
        .credentials(credentials)
        .build();

    let outcome = cache.fetch_overview(false).await;
    assert!(outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("Overview loaded"));

    let again = cache.fetch_overview(false).await;
    assert!(again.success);
    assert_eq!(server.requests.lock().unwrap().len(), 1);

    assert_eq!(cache.total_users(), 36);
    assert_eq!(cache.integration_status(Platform::Teams), "disconnected");
    let ids: Vec<String> = cache.recent_activity().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["slack-sync", "whatsapp-sync", "token-usage"]);
}

#[tokio::test]
async fn test_cache_logical_failure_over_http() {
    let server = serve(
        "200 OK",
        r#"{"status":"error","message":"Integration service unavailable"}"#,
    )
    .await;
    let cache = OverviewCacheBuilder::new(Arc::new(transport(&server))).build();

    let outcome = cache.fetch_overview(false).await;

    assert!(!outcome.success);
    assert_eq!(
        cache.error().as_deref(),
        Some("Integration service unavailable")
    );
    assert!(cache.snapshot().is_none());
}

#[tokio::test]
async fn test_cache_401_in_render_context_clears_cookie_only() {
    let server = serve("401 Unauthorized", r#"{"message":"Unauthorized"}"#).await;
    let credentials = Arc::new(MemoryCredentialStore::with_tokens(
        Some("local"),
        Some("cookie"),
    ));
    let cache = OverviewCacheBuilder::new(Arc::new(transport(&server)))
        .credentials(credentials.clone())
        .context(ExecutionContext::Render)
        .build();

    let outcome = cache.fetch_overview(false).await;

    assert_eq!(outcome.message.as_deref(), Some("Authentication required"));
    assert_eq!(cache.error(), None);
    assert_eq!(credentials.token(), Some("local".to_string()));
    assert_eq!(credentials.cookie_token(), None);
    assert!(server.requests.lock().unwrap()[0]
        .to_lowercase()
        .contains("authorization: bearer cookie"));
}
