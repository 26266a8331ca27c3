//! Immutable, transport-ready requests.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::TransportError;
use crate::method::RestMethod;
use crate::query::QueryParams;

/// The fully-resolved form of one call's configuration.
///
/// Built once per call by [`Endpoint::into_request`](crate::Endpoint::into_request).
/// Nothing can change it afterwards. Cloning is cheap (the body is
/// reference-counted), so a decorating transport may send the same
/// descriptor more than once.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    endpoint: &'static str,
    method: RestMethod,
    path: String,
    query: QueryParams,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        endpoint: &'static str,
        method: RestMethod,
        path: String,
        query: QueryParams,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            endpoint,
            method,
            path,
            query,
            headers,
            body,
        }
    }

    /// Identifier of the endpoint that produced this request.
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Resolved, percent-encoded path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query.encode()
    }

    /// Request headers, per-call overrides already applied.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Request body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body length in bytes, zero without a body.
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Bytes::len)
    }

    /// Returns `true` if a retrying layer may resend this request after
    /// `error`: the failure is transient and the method is idempotent.
    pub fn can_retry(&self, error: &TransportError) -> bool {
        error.is_retryable() && self.method.is_idempotent()
    }

    /// Joins this request onto a node address.
    ///
    /// The node's own path is kept as a prefix, so a node behind a proxy at
    /// `https://proxy/search` receives `https://proxy/search/_cluster/health`.
    pub fn url_for(&self, node: &Url) -> Url {
        let mut url = node.clone();
        let prefix = node.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{}", self.path));
        let query = self.query.encode();
        url.set_query((!query.is_empty()).then_some(query.as_str()));
        url
    }
}
