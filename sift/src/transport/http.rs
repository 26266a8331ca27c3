//! The default transport, over a pooled `reqwest` client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use super::Transport;
use crate::client::{ClientConfig, Credentials};
use crate::descriptor::RequestDescriptor;
use crate::error::{ConfigError, TransportError};
use crate::response::Response;

const USER_AGENT_VALUE: &str = concat!("sift/", env!("CARGO_PKG_VERSION"));

/// Sends requests over HTTP(S) to one or more nodes.
///
/// Requests rotate round-robin across the configured node addresses. A
/// node address may carry a path, which is kept as a prefix of every
/// request path. Credentials, default headers and the client-wide timeout
/// come from the [`ClientConfig`].
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    nodes: Vec<Url>,
    cursor: AtomicUsize,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds the transport and its connection pool.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if no addresses are configured, an address
    /// is not `http`/`https`, a default header is invalid, or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        if config.addresses.is_empty() {
            return Err(ConfigError::NoAddresses);
        }
        for address in &config.addresses {
            if !matches!(address.scheme(), "http" | "https") {
                return Err(ConfigError::UnsupportedScheme {
                    url: address.to_string(),
                });
            }
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        for (name, value) in &config.headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|e| ConfigError::invalid_header(name, e))?;
            let header_value = HeaderValue::try_from(value.as_str())
                .map_err(|e| ConfigError::invalid_header(name, e))?;
            default_headers.insert(header_name, header_value);
        }

        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            nodes: config.addresses.clone(),
            cursor: AtomicUsize::new(0),
            credentials: config.credentials.clone(),
            timeout,
        })
    }

    /// The node addresses requests rotate across.
    pub fn nodes(&self) -> &[Url] {
        &self.nodes
    }

    fn next_node(&self) -> &Url {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.nodes.len();
        &self.nodes[index]
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            None => builder,
            Some(Credentials::Basic { username, password }) => {
                builder.basic_auth(username, Some(password))
            }
            Some(Credentials::ApiKey { key }) => {
                builder.header(AUTHORIZATION, format!("ApiKey {key}"))
            }
            Some(Credentials::Bearer { token }) => builder.bearer_auth(token),
        }
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_connect() {
            TransportError::Connection(error.to_string())
        } else if error.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            TransportError::Request(error)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Response, TransportError> {
        let url = request.url_for(self.next_node());
        debug!(
            endpoint = request.endpoint(),
            method = %request.method(),
            url = %url,
            body_len = request.body_len(),
            "sending request"
        );

        let mut builder = self
            .client
            .request(request.method().into(), url.clone())
            .headers(request.headers().clone());
        builder = self.authorize(builder);
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        match builder.send().await {
            Ok(response) => {
                debug!(
                    endpoint = request.endpoint(),
                    status = response.status().as_u16(),
                    "response received"
                );
                Ok(Response::from_reqwest(response))
            }
            Err(error) => {
                let error = self.map_error(error);
                warn!(endpoint = request.endpoint(), url = %url, error = %error, "exchange failed");
                Err(error)
            }
        }
    }
}
