//! Client configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "http://localhost:9200";

/// Comma-separated node addresses.
pub const ENV_URL: &str = "SIFT_URL";
/// Basic auth user name, used together with [`ENV_PASSWORD`].
pub const ENV_USERNAME: &str = "SIFT_USERNAME";
/// Basic auth password.
pub const ENV_PASSWORD: &str = "SIFT_PASSWORD";
/// API key, preferred over basic auth when both are set.
pub const ENV_API_KEY: &str = "SIFT_API_KEY";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// How the client authenticates.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// HTTP basic auth.
    Basic {
        /// User name.
        username: String,
        /// Password.
        password: String,
    },
    /// `Authorization: ApiKey <key>`.
    ApiKey {
        /// Encoded API key.
        key: String,
    },
    /// `Authorization: Bearer <token>`.
    Bearer {
        /// Bearer token.
        token: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::ApiKey { .. } => f.debug_struct("ApiKey").field("key", &"<redacted>").finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Settings for the default HTTP transport.
///
/// Deserializable, so it can live in an application's own config file:
///
/// ```rust
/// use sift::{ClientConfig, Credentials};
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "addresses": ["https://node-1:9200", "https://node-2:9200"],
///     "credentials": { "type": "api_key", "key": "c2lmdA==" },
///     "timeout_ms": 5000
/// }"#).unwrap();
///
/// assert_eq!(config.addresses.len(), 2);
/// assert!(matches!(config.credentials, Some(Credentials::ApiKey { .. })));
/// assert_eq!(config.pool_max_idle_per_host, 10);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node addresses, used round-robin.
    pub addresses: Vec<Url>,
    /// Credentials sent with every request.
    pub credentials: Option<Credentials>,
    /// Client-wide request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Idle connections kept per node.
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addresses: vec![default_address()],
            credentials: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            headers: BTreeMap::new(),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }
}

fn default_address() -> Url {
    Url::parse(DEFAULT_ADDRESS).expect("default address is a valid URL")
}

impl ClientConfig {
    /// Reads the configuration from `SIFT_*` environment variables, falling
    /// back to defaults for anything unset.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if `SIFT_URL` holds an invalid or empty
    /// address list.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if the URL variable holds an invalid or
    /// empty address list.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(urls) = lookup(ENV_URL) {
            config.addresses = parse_addresses(&urls)?;
        }

        if let Some(key) = lookup(ENV_API_KEY) {
            config.credentials = Some(Credentials::ApiKey { key });
        } else if let (Some(username), Some(password)) =
            (lookup(ENV_USERNAME), lookup(ENV_PASSWORD))
        {
            config.credentials = Some(Credentials::Basic { username, password });
        }

        Ok(config)
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Parses a comma-separated address list.
fn parse_addresses(list: &str) -> Result<Vec<Url>, ConfigError> {
    let addresses = list
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(Url::parse)
        .collect::<Result<Vec<_>, _>>()?;
    if addresses.is_empty() {
        return Err(ConfigError::NoAddresses);
    }
    Ok(addresses)
}
