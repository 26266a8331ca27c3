//! Pluggable execution of request descriptors.
//!
//! [`Transport`] is the seam between building a request and performing it.
//! [`HttpTransport`] is the default. Tests use
//! [`StubTransport`](crate::testing::StubTransport), and decorators
//! (retrying, metrics, recording) wrap any other transport.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::descriptor::RequestDescriptor;
use crate::error::TransportError;
use crate::response::Response;

/// Performs one HTTP exchange for a [`RequestDescriptor`].
///
/// Implementors only write [`send`](Transport::send). The provided
/// [`execute`](Transport::execute) runs it under the call's
/// [`CallContext`]: a cancelled or expired context fails before `send` is
/// ever called, an exchange still running when the context fires is
/// dropped, and a body still being read ends with the context's error.
///
/// Transports must not retry on their own. A non-2xx status is a
/// successful exchange and comes back as `Ok(Response)`.
///
/// ## Examples
///
/// A decorator that counts calls before delegating:
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use async_trait::async_trait;
/// use sift::{RequestDescriptor, Response, Transport, TransportError};
///
/// struct Counting<T> {
///     inner: T,
///     calls: AtomicUsize,
/// }
///
/// #[async_trait]
/// impl<T: Transport> Transport for Counting<T> {
///     async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
///         self.calls.fetch_add(1, Ordering::Relaxed);
///         self.inner.send(request).await
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the engine's response.
    async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError>;

    /// Sends `request` unless `ctx` is cancelled or expired. If `ctx` fires
    /// while the exchange is in flight, it is aborted; if it fires while the
    /// body is being read, the read fails.
    async fn execute(
        &self,
        request: &RequestDescriptor,
        ctx: &CallContext,
    ) -> Result<Response, TransportError> {
        ctx.run_response(self.send(request)).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        (**self).send(request).await
    }

    async fn execute(
        &self,
        request: &RequestDescriptor,
        ctx: &CallContext,
    ) -> Result<Response, TransportError> {
        (**self).execute(request, ctx).await
    }
}
