//! HTTP method types for the engine's REST API.

use strum::{AsRefStr, Display, EnumString};

/// HTTP methods used by the engine's REST endpoints.
///
/// Every endpoint fixes its method at definition time; callers never set it.
///
/// ## Examples
///
/// ```rust
/// use sift::RestMethod;
///
/// let method = RestMethod::Head;
/// assert!(method.is_idempotent());
/// assert_eq!(method.to_string(), "HEAD");
///
/// let parsed: RestMethod = "PUT".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Read a resource.
    Get,
    /// HTTP HEAD - Existence checks and pings.
    Head,
    /// HTTP POST - Searches, document writes, bulk.
    Post,
    /// HTTP PUT - Create or replace indices, mappings, settings.
    Put,
    /// HTTP DELETE - Remove documents or indices.
    Delete,
}

impl RestMethod {
    /// Returns `true` if sending the same request twice has the same effect
    /// as sending it once.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Head => reqwest::Method::HEAD,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
