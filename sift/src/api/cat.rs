//! Compact, human-oriented `_cat` APIs.

use crate::client::Client;
use crate::param::List;

endpoint! {
    /// Lists indices with their health, document counts and sizes.
    CatIndices {
        id: "cat.indices",
        method: Get,
        paths: ["/_cat/indices/{index}", "/_cat/indices"],
        required: [],
        path_params: {
            index: List => with_index,
        },
        query: {
            format: String => with_format,
            h: List => with_h,
            health: String => with_health,
            help: bool => with_help,
            pri: bool => with_pri,
            v: bool => with_v,
            s: List => with_s,
            bytes: String => with_bytes,
            expand_wildcards: List => with_expand_wildcards,
        },
        body: Forbidden,
    }
}

endpoint! {
    /// One-line cluster health summary.
    CatHealth {
        id: "cat.health",
        method: Get,
        paths: ["/_cat/health"],
        required: [],
        path_params: {},
        query: {
            format: String => with_format,
            h: List => with_h,
            help: bool => with_help,
            ts: bool => with_ts,
            v: bool => with_v,
            s: List => with_s,
        },
        body: Forbidden,
    }
}

/// The `_cat` namespace.
#[derive(Debug, Clone, Copy)]
pub struct Cat<'a> {
    client: &'a Client,
}

impl<'a> Cat<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn client(&self) -> &Client {
        self.client
    }

    operations! {
        /// Lists indices.
        indices => CatIndices();
        /// Summarizes cluster health.
        health => CatHealth();
    }
}

impl Client {
    /// Compact `_cat` APIs.
    pub fn cat(&self) -> Cat<'_> {
        Cat::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::apply_all;
    use crate::Endpoint;

    #[test]
    fn test_cat_indices_columns() {
        let mut request = CatIndices::new();
        apply_all(
            &mut request,
            [
                CatIndices::with_index("logs-*"),
                CatIndices::with_format("json"),
                CatIndices::with_h(["index", "docs.count"]),
                CatIndices::with_v(true),
            ],
        );
        let (request, _) = request.into_request().unwrap();
        assert_eq!(request.path(), "/_cat/indices/logs-*");
        assert_eq!(request.query().get("h"), Some("index,docs.count"));
        assert_eq!(request.query().get("format"), Some("json"));
        assert_eq!(request.query().get("v"), Some("true"));
    }

    #[test]
    fn test_cat_health_defaults() {
        let (request, _) = CatHealth::new().into_request().unwrap();
        assert_eq!(request.path(), "/_cat/health");
        assert!(request.query().is_empty());
        assert!(request.headers().get("content-type").is_none());
    }
}
