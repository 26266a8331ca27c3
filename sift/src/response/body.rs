//! Single-use streamed response bodies.

use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::TransportError;

/// The body of a [`Response`](crate::Response), owning whatever network
/// resource backs it.
///
/// It can be read once. Every way of finishing with it (reading it to the
/// end, [`close`](Self::close), or dropping it) releases the resource, and
/// since each of those takes the body by value, no release can happen twice.
pub struct ResponseBody {
    stream: BoxStream<'static, Result<Bytes, TransportError>>,
}

impl ResponseBody {
    /// Wraps a chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: futures::Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            stream: stream.boxed(),
        }
    }

    /// A body already held in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Self::empty();
        }
        Self::from_stream(stream::once(async move { Ok(bytes) }))
    }

    /// A body with no content.
    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Returns the next chunk, or `None` at the end of the body.
    ///
    /// ## Errors
    ///
    /// Returns a [`TransportError`] if reading from the network fails.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, TransportError> {
        self.stream.next().await.transpose()
    }

    /// Reads the rest of the body into memory and releases it.
    ///
    /// ## Errors
    ///
    /// Returns a [`TransportError`] if reading from the network fails.
    pub async fn bytes(mut self) -> Result<Bytes, TransportError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Releases the body without reading it.
    pub fn close(self) {
        drop(self);
    }

    /// Hands over the raw chunk stream.
    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes, TransportError>> {
        self.stream
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}
