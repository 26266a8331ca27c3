//! The client: configuration, transport ownership and the uniform call path.

mod config;

pub use config::{
    ClientConfig, Credentials, DEFAULT_ADDRESS, ENV_API_KEY, ENV_PASSWORD, ENV_URL, ENV_USERNAME,
};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, field, instrument, warn, Span};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{ConfigError, SiftError};
use crate::option::{apply_all, RequestOption};
use crate::response::Response;
use crate::transport::{HttpTransport, Transport};

/// Entry point to the engine's API.
///
/// Cheap to clone and safe to share across tasks; clones share one
/// transport and its connection pool. Root operations are methods on the
/// client itself, grouped operations hang off [`indices`](Self::indices),
/// [`cluster`](Self::cluster) and [`cat`](Self::cat).
///
/// ## Examples
///
/// ```rust,ignore
/// use sift::api::{IndicesCreate, Search};
/// use sift::Client;
///
/// let client = Client::builder()
///     .address("https://search.internal:9200")?
///     .api_key(std::env::var("SEARCH_API_KEY")?)
///     .build()?;
///
/// let response = client
///     .indices()
///     .create("logs", [IndicesCreate::with_body(r#"{"settings":{}}"#)])
///     .await?;
/// response.close();
///
/// let hits = client
///     .search([Search::with_index("logs"), Search::with_q("level:error")])
///     .await?
///     .text()
///     .await?;
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client configured from `SIFT_*` environment variables,
    /// defaulting to `http://localhost:9200` without credentials.
    ///
    /// ## Errors
    ///
    /// Returns an error if the environment holds an invalid configuration or
    /// the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, SiftError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    /// Creates a client over the default HTTP transport.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SiftError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Creates a builder for configuring the default HTTP transport.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Performs any endpoint.
    ///
    /// Options are applied in order, the configuration is validated and
    /// frozen into a request, and the request is executed under the call's
    /// context. Every generated operation method delegates here.
    ///
    /// ## Errors
    ///
    /// [`SiftError::Build`] if the configuration is invalid (nothing is
    /// sent), [`SiftError::Transport`] if the exchange fails. Error statuses
    /// from the engine are returned as `Ok`.
    #[instrument(
        name = "sift_request",
        skip_all,
        fields(
            db.operation = E::ID,
            http.method = %E::METHOD,
            http.path = field::Empty,
            http.status_code = field::Empty,
            otel.kind = "client",
            otel.status_code = field::Empty,
        )
    )]
    pub async fn perform<E: Endpoint>(
        &self,
        mut endpoint: E,
        options: impl IntoIterator<Item = RequestOption<E>>,
    ) -> Result<Response, SiftError> {
        apply_all(&mut endpoint, options);
        let (request, ctx) = endpoint.into_request()?;

        let span = Span::current();
        span.record("http.path", request.path());
        debug!(
            query = %request.query_string(),
            body_len = request.body_len(),
            "request prepared"
        );

        match self.transport.execute(&request, &ctx).await {
            Ok(response) => {
                span.record("http.status_code", response.status().as_u16());
                span.record(
                    "otel.status_code",
                    if response.is_error() { "ERROR" } else { "OK" },
                );
                Ok(response)
            }
            Err(error) => {
                span.record("otel.status_code", "ERROR");
                warn!(error = %error, "request failed");
                Err(error.into())
            }
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

/// Fluent configuration for a [`Client`] over the default HTTP transport.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    addresses_set: bool,
}

impl ClientBuilder {
    /// Starts from the defaults (`http://localhost:9200`, no credentials).
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            addresses_set: false,
        }
    }

    /// Adds a node address. The first call replaces the default address.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `address` does not parse.
    pub fn address(mut self, address: impl AsRef<str>) -> Result<Self, ConfigError> {
        let url = Url::parse(address.as_ref())?;
        if !self.addresses_set {
            self.config.addresses.clear();
            self.addresses_set = true;
        }
        self.config.addresses.push(url);
        Ok(self)
    }

    /// Uses HTTP basic auth.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Uses an API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::ApiKey { key: key.into() });
        self
    }

    /// Uses a bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::Bearer {
            token: token.into(),
        });
        self
    }

    /// Sets the client-wide request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Adds a header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Sets how many idle connections are kept per node.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the client.
    ///
    /// ## Errors
    ///
    /// Returns [`SiftError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client, SiftError> {
        Client::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::IndicesCreate;
    use crate::testing::StubTransport;
    use crate::TransportError;
    use tracing_test::traced_test;

    #[test]
    fn test_builder_first_address_replaces_default() {
        let builder = Client::builder()
            .address("http://node-a:9200")
            .unwrap()
            .address("http://node-b:9200")
            .unwrap();
        let hosts: Vec<_> = builder
            .config()
            .addresses
            .iter()
            .map(|u| u.host_str().unwrap().to_string())
            .collect();
        assert_eq!(hosts, ["node-a", "node-b"]);
    }

    #[test]
    fn test_builder_rejects_invalid_address() {
        let err = Client::builder().address("::not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_builder_rejects_invalid_header_at_build() {
        let err = Client::builder()
            .default_header("bad header", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, SiftError::Config(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn test_builder_settings() {
        let builder = Client::builder()
            .timeout(Duration::from_secs(2))
            .bearer_token("t0ken")
            .pool_max_idle_per_host(4);
        assert_eq!(builder.config().timeout_ms, 2000);
        assert_eq!(builder.config().pool_max_idle_per_host, 4);
        assert!(matches!(
            builder.config().credentials,
            Some(Credentials::Bearer { .. })
        ));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Client>();
    }

    #[tokio::test]
    #[traced_test]
    async fn test_perform_records_span() {
        let stub = StubTransport::new().respond(200, r#"{"acknowledged":true}"#);
        let client = Client::with_transport(stub.clone());

        let response = client
            .perform(IndicesCreate::new("logs"), [IndicesCreate::with_pretty()])
            .await
            .unwrap();
        response.close();

        assert!(logs_contain("request prepared"));
        assert!(logs_contain("indices.create"));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_perform_warns_on_transport_failure() {
        let stub = StubTransport::new().refuse_connections();
        let client = Client::with_transport(stub);

        let err = client.indices().create("logs", []).await.unwrap_err();
        assert!(matches!(
            err,
            SiftError::Transport(TransportError::Connection(_))
        ));
        assert!(logs_contain("request failed"));
    }

    #[tokio::test]
    async fn test_build_error_sends_nothing() {
        let stub = StubTransport::new().respond(200, "{}");
        let client = Client::with_transport(stub.clone());

        let err = client.indices().put_mapping("logs", []).await.unwrap_err();
        assert!(err.is_build());
        assert_eq!(stub.calls(), 0);
    }
}
