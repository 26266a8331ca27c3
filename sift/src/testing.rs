//! An in-memory transport for exercising clients without a network.
//!
//! ```rust
//! # async fn demo() -> Result<(), sift::SiftError> {
//! use sift::testing::StubTransport;
//! use sift::Client;
//!
//! let stub = StubTransport::new().respond(200, r#"{"status":"green"}"#);
//! let client = Client::with_transport(stub.clone());
//!
//! let body = client.cluster().health([]).await?.text().await?;
//! assert!(body.contains("green"));
//! assert_eq!(stub.last_request().unwrap().path(), "/_cluster/health");
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;

use crate::descriptor::RequestDescriptor;
use crate::error::TransportError;
use crate::response::Response;
use crate::transport::Transport;

#[derive(Debug, Clone)]
enum Reply {
    Respond {
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    },
    Refuse,
}

#[derive(Debug)]
struct Inner {
    reply: Mutex<Reply>,
    delay: Mutex<Option<Duration>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    bytes_sent: AtomicUsize,
    released: Arc<AtomicUsize>,
}

/// A [`Transport`] that records every request and answers with a canned
/// reply.
///
/// Clones share state, so keep one clone to inspect after handing another
/// to [`Client::with_transport`](crate::Client::with_transport). By default
/// every call gets `200` with an empty body.
#[derive(Debug, Clone)]
pub struct StubTransport {
    inner: Arc<Inner>,
}

impl Default for StubTransport {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                reply: Mutex::new(Reply::Respond {
                    status: StatusCode::OK,
                    headers: HeaderMap::new(),
                    body: Bytes::new(),
                }),
                delay: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
                bytes_sent: AtomicUsize::new(0),
                released: Arc::new(AtomicUsize::new(0)),
            }),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StubTransport {
    /// A stub answering `200` with an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every call with `status` and `body`.
    ///
    /// Invalid status codes fall back to `500`.
    pub fn respond(self, status: u16, body: impl Into<Bytes>) -> Self {
        *lock(&self.inner.reply) = Reply::Respond {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            headers: HeaderMap::new(),
            body: body.into(),
        };
        self
    }

    /// Adds a header to the canned response. Ignored for invalid names or
    /// values and when refusing connections.
    pub fn with_header(self, name: &str, value: &str) -> Self {
        if let Reply::Respond { headers, .. } = &mut *lock(&self.inner.reply) {
            if let (Ok(name), Ok(value)) =
                (HeaderName::try_from(name), HeaderValue::try_from(value))
            {
                headers.insert(name, value);
            }
        }
        self
    }

    /// Fails every call with [`TransportError::Connection`].
    pub fn refuse_connections(self) -> Self {
        *lock(&self.inner.reply) = Reply::Refuse;
        self
    }

    /// Waits `delay` before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *lock(&self.inner.delay) = Some(delay);
        self
    }

    /// Every request that reached [`Transport::send`], in order.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        lock(&self.inner.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        lock(&self.inner.requests).last().cloned()
    }

    /// Number of requests that reached [`Transport::send`].
    pub fn calls(&self) -> usize {
        lock(&self.inner.requests).len()
    }

    /// Total request body bytes handed to the transport.
    pub fn bytes_sent(&self) -> usize {
        self.inner.bytes_sent.load(Ordering::SeqCst)
    }

    /// Number of response bodies released so far.
    pub fn bodies_released(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }
}

/// Counts one release when the body stream holding it is dropped.
struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        lock(&self.inner.requests).push(request.clone());
        self.inner
            .bytes_sent
            .fetch_add(request.body_len(), Ordering::SeqCst);

        let delay = *lock(&self.inner.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = lock(&self.inner.reply).clone();
        match reply {
            Reply::Refuse => Err(TransportError::Connection(
                "connection refused".to_string(),
            )),
            Reply::Respond {
                status,
                headers,
                body,
            } => {
                let guard = ReleaseGuard(Arc::clone(&self.inner.released));
                let chunks = if body.is_empty() { vec![] } else { vec![body] };
                let stream = stream::iter(chunks).map(move |chunk| {
                    let _held = &guard;
                    Ok(chunk)
                });
                Ok(Response::from_stream(status, headers, stream))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RestMethod;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::new(
            "test",
            RestMethod::Post,
            "/_test".to_string(),
            Default::default(),
            HeaderMap::new(),
            Some(Bytes::from_static(b"{}")),
        )
    }

    #[tokio::test]
    async fn test_records_requests() {
        let stub = StubTransport::new().respond(201, "created");
        let response = stub.send(&descriptor()).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.text().await.unwrap(), "created");
        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.bytes_sent(), 2);
        assert_eq!(stub.last_request().unwrap().path(), "/_test");
    }

    #[tokio::test]
    async fn test_release_counted_once_per_body() {
        let stub = StubTransport::new().respond(200, "{}");

        let first = stub.send(&descriptor()).await.unwrap();
        first.close();
        let second = stub.send(&descriptor()).await.unwrap();
        second.bytes().await.unwrap();
        let third = stub.send(&descriptor()).await.unwrap();
        drop(third);

        assert_eq!(stub.bodies_released(), 3);
    }

    #[tokio::test]
    async fn test_refuse_connections() {
        let stub = StubTransport::new().refuse_connections();
        let err = stub.send(&descriptor()).await.unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
    }

    #[tokio::test]
    async fn test_canned_header() {
        let stub = StubTransport::new()
            .respond(200, "{}")
            .with_header("x-elastic-product", "Elasticsearch");
        let response = stub.send(&descriptor()).await.unwrap();
        assert_eq!(response.header("x-elastic-product"), Some("Elasticsearch"));
    }
}
