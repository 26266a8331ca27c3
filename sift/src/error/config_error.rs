//! Client configuration errors.

use thiserror::Error;

/// Errors raised while constructing a client or its transport.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A node address could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A node address used a scheme other than http or https.
    #[error("Unsupported scheme in node address: {url}")]
    UnsupportedScheme {
        /// The rejected address.
        url: String,
    },

    /// No node addresses were configured.
    #[error("No node addresses configured")]
    NoAddresses,

    /// A default header had an invalid name or value.
    #[error("Invalid default header `{name}`: {reason}")]
    InvalidHeader {
        /// Header name as configured.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err = ConfigError::from(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_header() {
        let err = ConfigError::invalid_header("x bad", "invalid HTTP header name");
        assert_eq!(
            err.to_string(),
            "Invalid default header `x bad`: invalid HTTP header name"
        );
    }
}
