//! End-to-end calls through the client against an in-memory transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::stream;
use sift::api::{Bulk, Get, IndicesCreate, Search};
use sift::testing::StubTransport;
use sift::{
    Body, BuildError, CancellationToken, Client, HeaderMap, RequestDescriptor, RestMethod,
    Response, SiftError, StatusCode, Transport, TransportError,
};

#[tokio::test]
async fn test_create_index_end_to_end() {
    let stub = StubTransport::new().respond(200, r#"{"acknowledged":true}"#);
    let client = Client::with_transport(stub.clone());

    let body = r#"{"settings":{"number_of_shards":1}}"#;
    let response = client
        .indices()
        .create(
            "logs",
            [
                IndicesCreate::with_body(body),
                IndicesCreate::with_pretty(),
                IndicesCreate::with_timeout(Duration::from_secs(5)),
            ],
        )
        .await
        .unwrap();

    let request = stub.last_request().unwrap();
    assert_eq!(request.method(), RestMethod::Put);
    assert_eq!(request.path(), "/logs");
    assert_eq!(request.query().get("pretty"), Some("true"));
    assert_eq!(request.query().get("timeout"), Some("5000ms"));
    assert_eq!(request.body().unwrap().as_ref(), body.as_bytes());
    assert_eq!(request.header("content-type"), Some("application/json"));

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.bodies_released(), 0);
    assert_eq!(response.text().await.unwrap(), r#"{"acknowledged":true}"#);
    assert_eq!(stub.bodies_released(), 1);
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let stub = StubTransport::new().respond(404, r#"{"found":false}"#);
    let client = Client::with_transport(stub.clone());

    let response = client.get("logs", "missing", []).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.is_error());

    response.close();
    assert_eq!(stub.bodies_released(), 1);
}

#[tokio::test]
async fn test_error_status_body_is_readable() {
    let stub = StubTransport::new().respond(
        404,
        r#"{"_index":"logs","_id":"missing","found":false}"#,
    );
    let client = Client::with_transport(stub.clone());

    let response = client.get("logs", "missing", []).await.unwrap();
    assert_eq!(response.to_string(), "[404 Not Found]");

    let doc: serde_json::Value = response.json().await.unwrap();
    assert_eq!(doc["found"], false);
    assert_eq!(doc["_id"], "missing");
    assert_eq!(stub.bodies_released(), 1);
}

#[tokio::test]
async fn test_connection_failure_is_an_error() {
    let stub = StubTransport::new().refuse_connections();
    let client = Client::with_transport(stub.clone());

    let err = client.info([]).await.unwrap_err();
    assert!(matches!(
        err,
        SiftError::Transport(TransportError::Connection(_))
    ));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_cancelled_before_call_sends_nothing() {
    let stub = StubTransport::new();
    let client = Client::with_transport(stub.clone());
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .indices()
        .create(
            "logs",
            [
                IndicesCreate::with_body("{}"),
                IndicesCreate::with_cancellation(token),
            ],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SiftError::Transport(TransportError::Cancelled)));
    assert_eq!(stub.calls(), 0);
    assert_eq!(stub.bytes_sent(), 0);
}

#[tokio::test]
async fn test_expired_deadline_sends_nothing() {
    let stub = StubTransport::new();
    let client = Client::with_transport(stub.clone());

    let err = client
        .ping([sift::api::Ping::with_deadline(Instant::now())])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SiftError::Transport(TransportError::Timeout { .. })
    ));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_cancel_mid_flight() {
    let stub = StubTransport::new()
        .respond(200, "{}")
        .with_delay(Duration::from_secs(5));
    let client = Client::with_transport(stub.clone());
    let token = CancellationToken::new();

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = client
        .search([Search::with_cancellation(token)])
        .await
        .unwrap_err();

    assert!(matches!(err, SiftError::Transport(TransportError::Cancelled)));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_request_timeout_aborts_slow_call() {
    let stub = StubTransport::new().with_delay(Duration::from_secs(5));
    let client = Client::with_transport(stub);

    let err = client
        .search([Search::with_request_timeout(Duration::from_millis(20))])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SiftError::Transport(TransportError::Timeout { duration_ms: 20 })
    ));
}

#[tokio::test]
async fn test_validation_fails_before_io() {
    let stub = StubTransport::new();
    let client = Client::with_transport(stub.clone());

    let err = client.get("logs", "", []).await.unwrap_err();
    assert!(err.is_build());

    let err = client.bulk([]).await.unwrap_err();
    assert!(err.is_build());

    let err = client.delete("logs", "..", []).await.unwrap_err();
    assert!(matches!(
        err,
        SiftError::Build(BuildError::DotSegment { param: "id", .. })
    ));

    let err = client.indices().delete(".", []).await.unwrap_err();
    assert!(matches!(
        err,
        SiftError::Build(BuildError::DotSegment { param: "index", .. })
    ));

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_last_write_wins() {
    let stub = StubTransport::new();
    let client = Client::with_transport(stub.clone());

    client
        .search([
            Search::with_size(10),
            Search::with_header("X-Trace", "first"),
            Search::with_size(25),
            Search::with_header("x-trace", "second"),
        ])
        .await
        .unwrap()
        .close();

    let request = stub.last_request().unwrap();
    assert_eq!(request.query().get("size"), Some("25"));
    assert_eq!(request.header("x-trace"), Some("second"));
}

#[tokio::test]
async fn test_caller_content_type_overrides_default() {
    let stub = StubTransport::new();
    let client = Client::with_transport(stub.clone());

    client
        .bulk([
            Bulk::with_body(Body::from("{\"index\":{\"_index\":\"logs\"}}\n{}\n")),
            Bulk::with_header("Content-Type", "application/vnd.elasticsearch+x-ndjson"),
        ])
        .await
        .unwrap()
        .close();

    let request = stub.last_request().unwrap();
    assert_eq!(
        request.header("content-type"),
        Some("application/vnd.elasticsearch+x-ndjson")
    );
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let stub = StubTransport::new().respond(200, "{}");
    let client = Client::with_transport(stub.clone());

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .get("logs", format!("doc-{i}"), [Get::with_routing("r")])
                    .await
                    .map(Response::close)
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(stub.calls(), 8);
    assert_eq!(stub.bodies_released(), 8);
    let mut paths: Vec<_> = stub
        .requests()
        .iter()
        .map(|r| r.path().to_string())
        .collect();
    paths.sort();
    assert_eq!(paths[0], "/logs/_doc/doc-0");
}

/// Counts attempts, then delegates.
struct Counting<T> {
    inner: T,
    attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl<T: Transport> Transport for Counting<T> {
    async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.inner.send(request).await
    }
}

#[tokio::test]
async fn test_decorating_transport() {
    let stub = StubTransport::new().respond(200, "{}");
    let attempts = Arc::new(AtomicUsize::new(0));
    let client = Client::with_transport(Counting {
        inner: stub.clone(),
        attempts: Arc::clone(&attempts),
    });

    client.cluster().health([]).await.unwrap().close();
    client.cat().indices([]).await.unwrap().close();

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    let paths: Vec<_> = stub
        .requests()
        .iter()
        .map(|r| r.path().to_string())
        .collect();
    assert_eq!(paths, ["/_cluster/health", "/_cat/indices"]);
}

/// Answers with headers at once and a body that never arrives.
struct EndlessBody;

#[async_trait]
impl Transport for EndlessBody {
    async fn send(&self, _request: &RequestDescriptor) -> Result<Response, TransportError> {
        Ok(Response::from_stream(
            StatusCode::OK,
            HeaderMap::new(),
            stream::pending(),
        ))
    }
}

#[tokio::test]
async fn test_cancel_while_reading_body() {
    let client = Client::with_transport(EndlessBody);
    let token = CancellationToken::new();

    let response = client
        .search([
            Search::with_cancellation(token.clone()),
            Search::with_request_timeout(Duration::from_secs(30)),
        ])
        .await
        .unwrap();
    token.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), response.bytes())
        .await
        .expect("body read should end once cancelled");
    assert!(matches!(result, Err(TransportError::Cancelled)));
}

#[tokio::test]
async fn test_request_timeout_bounds_body_read() {
    let client = Client::with_transport(EndlessBody);

    let response = client
        .info([sift::api::Info::with_request_timeout(Duration::from_millis(50))])
        .await
        .unwrap();

    let result = tokio::time::timeout(Duration::from_secs(1), response.text())
        .await
        .expect("body read should end at the deadline");
    assert!(matches!(
        result,
        Err(SiftError::Transport(TransportError::Timeout { duration_ms: 50 }))
    ));
}

/// Resends once when the descriptor allows it.
struct RetryOnce<T> {
    inner: T,
}

#[async_trait]
impl<T: Transport> Transport for RetryOnce<T> {
    async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        match self.inner.send(request).await {
            Err(error) if request.can_retry(&error) => self.inner.send(request).await,
            result => result,
        }
    }
}

#[tokio::test]
async fn test_retrying_decorator_skips_non_idempotent() {
    let stub = StubTransport::new().refuse_connections();
    let client = Client::with_transport(RetryOnce {
        inner: stub.clone(),
    });

    assert!(client.get("logs", "1", []).await.is_err());
    assert_eq!(stub.calls(), 2);

    assert!(client.search([]).await.is_err());
    assert_eq!(stub.calls(), 3);
}
