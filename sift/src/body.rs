//! Opaque request bodies.

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use crate::error::TransportError;

/// A request payload, passed to the engine as-is.
///
/// The client never interprets the bytes. [`Body::json`] and
/// [`Body::ndjson`] are conveniences for callers holding `Serialize` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body(Bytes);

impl Body {
    /// Wraps raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Serializes `value` as a JSON document.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::Encode`] if serialization fails.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, TransportError> {
        Ok(Self(serde_json::to_vec(value)?.into()))
    }

    /// Serializes each item as one JSON line, newline terminated, for the
    /// bulk endpoint.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::Encode`] if any line fails to serialize.
    pub fn ndjson<I, T>(lines: I) -> Result<Self, TransportError>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let mut buf = BytesMut::new().writer();
        for line in lines {
            serde_json::to_writer(&mut buf, &line)?;
            buf.get_mut().put_u8(b'\n');
        }
        Ok(Self(buf.into_inner().freeze()))
    }

    /// Returns the payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-length payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the body, returning the payload.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self(Bytes::from_static(s.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<Vec<u8>> for Body {
    fn from(v: Vec<u8>) -> Self {
        Self(v.into())
    }
}

impl From<&'static [u8]> for Body {
    fn from(v: &'static [u8]) -> Self {
        Self(Bytes::from_static(v))
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Self(b)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self(value.to_string().into())
    }
}
