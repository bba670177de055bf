use std::fmt;

use minisentry::{Event, MiniSentry, MiniSentryError, Session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: &str) -> MiniSentry {
    MiniSentry::builder(token)
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn send_posts_exact_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/abc123/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "message": "Hello",
            "level": "info",
            "release": "1.0.0",
            "environment": "development",
            "app": "go-example",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "abc123");
    let event = Event::new("Hello", "info")
        .release("1.0.0")
        .environment("development")
        .app("go-example");

    client.send(&event).await.unwrap();
}

#[tokio::test]
async fn send_succeeds_on_created_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/tok/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    client.send(&Event::new("created", "info")).await.unwrap();
}

#[tokio::test]
async fn server_error_maps_to_api_error_with_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/tok/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let err = client.send(&Event::new("Hello", "info")).await.unwrap_err();
    match err {
        MiniSentryError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    // Mock::expect(1) verifies on drop that no retry happened.
}

#[tokio::test]
async fn unknown_token_maps_to_api_404() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/wrong/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found."))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "wrong");
    let err = client.send(&Event::new("Hello", "info")).await.unwrap_err();
    assert!(matches!(err, MiniSentryError::Api { status: 404, .. }));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/tok/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let err = client.send(&Event::new("Hello", "info")).await.unwrap_err();
    match err {
        MiniSentryError::Auth(message) => assert_eq!(message, "invalid token"),
        other => panic!("expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/tok/"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let err = client.send(&Event::new("Hello", "info")).await.unwrap_err();
    assert!(matches!(err, MiniSentryError::RateLimited(_)));
}

#[tokio::test]
async fn connection_refused_surfaces_as_transport_error() {
    // Bind to grab a free port, then close it so the connect fails.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MiniSentry::builder("tok")
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();
    let err = client.send(&Event::new("Hello", "info")).await.unwrap_err();
    assert!(matches!(err, MiniSentryError::Http(_)));
}

#[tokio::test]
async fn send_session_posts_to_session_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sessions/ingest/token/tok/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "session_id": "sess-1",
            "status": "ok",
            "release": "1.0.0",
            "environment": "production",
            "user": "user-xyz",
            "duration_ms": 1200,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let session = Session::new("ok")
        .session_id("sess-1")
        .release("1.0.0")
        .environment("production")
        .user("user-xyz")
        .duration_ms(1200);

    client.send_session(&session).await.unwrap();
}

#[tokio::test]
async fn capture_message_applies_client_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/tok/"))
        .and(body_json(json!({
            "message": "deploy finished",
            "level": "info",
            "release": "2.0.0",
            "environment": "staging",
            "app": "deployer",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = MiniSentry::builder("tok")
        .base_url(server.uri())
        .release("2.0.0")
        .environment("staging")
        .app("deployer")
        .build()
        .unwrap();

    client.capture_message("deploy finished", "info").await.unwrap();
}

#[derive(Debug)]
struct ConfigError {
    source: std::io::Error,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config load failed")
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[tokio::test]
async fn capture_error_reports_source_chain_at_error_level() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/ingest/token/tok/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let err = ConfigError {
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml"),
    };
    client.capture_error(&err).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["message"], "config load failed");
    assert_eq!(body["level"], "error");
    let stack = body["stack"].as_str().unwrap();
    assert!(stack.starts_with("config load failed"));
    assert!(stack.contains("caused by: missing.toml"));
}
