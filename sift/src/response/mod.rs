//! The uniform result of a completed exchange.

mod body;

pub use body::ResponseBody;

use std::fmt;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, SiftError, TransportError};

/// Status, headers and a single-use body.
///
/// Any status the engine sends, 4xx and 5xx included, arrives as a
/// `Response`; only a failed exchange is an error. The caller is expected to
/// finish with the body: read it with [`bytes`](Self::bytes),
/// [`text`](Self::text) or [`json`](Self::json), or discard it with
/// [`close`](Self::close). Dropping the response releases it as well.
///
/// ## Examples
///
/// ```rust
/// use sift::{Response, StatusCode};
///
/// let response = Response::from_bytes(StatusCode::NOT_FOUND, r#"{"found":false}"#);
/// assert!(response.is_error());
/// assert!(response.is_client_error());
/// response.close();
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<ResponseBody>,
}

impl Response {
    /// Assembles a response from parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Option<ResponseBody>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response whose body is already in memory.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::new(
            status,
            HeaderMap::new(),
            Some(ResponseBody::from_bytes(body)),
        )
    }

    /// A response whose body is produced by `stream`.
    pub fn from_stream<S>(status: StatusCode, headers: HeaderMap, stream: S) -> Self
    where
        S: futures::Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self::new(status, headers, Some(ResponseBody::from_stream(stream)))
    }

    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from));
        Self::from_stream(status, headers, stream)
    }

    pub(crate) fn map_body(mut self, f: impl FnOnce(ResponseBody) -> ResponseBody) -> Self {
        self.body = self.body.take().map(f);
        self
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// `true` for 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `true` for any status of 400 or above.
    pub fn is_error(&self) -> bool {
        self.status.as_u16() >= 400
    }

    /// `true` for 4xx.
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// `true` for 5xx.
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }

    /// Takes the body out of the response. Returns `None` on every later
    /// call, and for responses without a body.
    pub fn take_body(&mut self) -> Option<ResponseBody> {
        self.body.take()
    }

    /// Reads the whole body and releases it.
    ///
    /// ## Errors
    ///
    /// Returns a [`TransportError`] if reading from the network fails.
    pub async fn bytes(mut self) -> Result<Bytes, TransportError> {
        match self.take_body() {
            Some(body) => body.bytes().await,
            None => Ok(Bytes::new()),
        }
    }

    /// Reads the whole body as UTF-8 text.
    ///
    /// ## Errors
    ///
    /// Fails if the body cannot be read or is not valid UTF-8.
    pub async fn text(self) -> Result<String, SiftError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(DecodeError::from)
            .map_err(SiftError::from)
    }

    /// Reads the whole body and deserializes it as JSON.
    ///
    /// ## Errors
    ///
    /// Fails if the body cannot be read or does not deserialize into `T`.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, SiftError> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(DecodeError::from)
            .map_err(SiftError::from)
    }

    /// Releases the body without reading it.
    pub fn close(mut self) {
        if let Some(body) = self.take_body() {
            body.close();
        }
    }
}

/// Renders the status line, e.g. `[200 OK]`. The body is left unread.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Ack {
        acknowledged: bool,
    }

    #[test]
    fn test_status_classification() {
        let ok = Response::from_bytes(StatusCode::OK, "");
        assert!(ok.is_success());
        assert!(!ok.is_error());

        let missing = Response::from_bytes(StatusCode::NOT_FOUND, "");
        assert!(missing.is_error());
        assert!(missing.is_client_error());
        assert!(!missing.is_server_error());

        let unavailable = Response::from_bytes(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(unavailable.is_error());
        assert!(unavailable.is_server_error());
    }

    #[test]
    fn test_display_status_line() {
        let ok = Response::from_bytes(StatusCode::OK, "{}");
        assert_eq!(ok.to_string(), "[200 OK]");

        let missing = Response::from_bytes(StatusCode::NOT_FOUND, "");
        assert_eq!(format!("{missing}"), "[404 Not Found]");
    }

    #[test]
    fn test_take_body_is_single_use() {
        let mut response = Response::from_bytes(StatusCode::OK, "{}");
        assert!(response.take_body().is_some());
        assert!(response.take_body().is_none());
    }

    #[tokio::test]
    async fn test_json_reader() {
        let response = Response::from_bytes(StatusCode::OK, r#"{"acknowledged":true}"#);
        let ack: Ack = response.json().await.unwrap();
        assert!(ack.acknowledged);
    }

    #[tokio::test]
    async fn test_json_reader_decode_error() {
        let response = Response::from_bytes(StatusCode::OK, "not json");
        let err = response.json::<Ack>().await.unwrap_err();
        assert!(matches!(err, SiftError::Decode(DecodeError::JsonParse(_))));
    }

    #[tokio::test]
    async fn test_text_after_take_body_is_empty() {
        let mut response = Response::from_bytes(StatusCode::OK, "body");
        let body = response.take_body().unwrap();
        assert_eq!(response.text().await.unwrap(), "");
        assert_eq!(body.bytes().await.unwrap().as_ref(), b"body");
    }

    #[test]
    fn test_content_type_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        let response = Response::new(StatusCode::OK, headers, None);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.header("content-type"), Some("application/json"));
    }
}
