//! Configuration shared by every endpoint.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::context::CallContext;
use crate::error::BuildError;
use crate::param::{List, ParamValue};
use crate::query::QueryParams;

/// Header carrying the caller's opaque request id.
const OPAQUE_ID_HEADER: &str = "x-opaque-id";

/// Parameters every endpoint accepts, embedded in each generated builder.
#[derive(Debug, Clone, Default)]
pub struct CommonParams {
    /// `?pretty`
    pub pretty: bool,
    /// `?human`
    pub human: bool,
    /// `?error_trace`
    pub error_trace: bool,
    /// `?filter_path=...`
    pub filter_path: Option<List>,
    /// Sent as `X-Opaque-Id`.
    pub opaque_id: Option<String>,
    /// Per-call header overrides, names lowercased.
    pub headers: Vec<(String, String)>,
    /// Cancellation and deadline for the call.
    pub context: CallContext,
}

impl CommonParams {
    /// Sets a header, replacing any earlier value for the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        self.headers.retain(|(existing, _)| *existing != name);
        self.headers.push((name, value.to_string()));
    }

    pub(crate) fn write_query(&self, query: &mut QueryParams) {
        if self.pretty {
            query.set("pretty", "true");
        }
        if self.human {
            query.set("human", "true");
        }
        if self.error_trace {
            query.set("error_trace", "true");
        }
        if let Some(paths) = &self.filter_path {
            query.set("filter_path", paths.to_param());
        }
    }

    /// Builds the final header map. Caller headers win over the defaults.
    pub(crate) fn header_map(
        &self,
        endpoint: &'static str,
        content_type: Option<&'static str>,
    ) -> Result<HeaderMap, BuildError> {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        let opaque = self
            .opaque_id
            .as_deref()
            .map(|id| (OPAQUE_ID_HEADER, id));
        let overrides = self
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));

        for (name, value) in opaque.into_iter().chain(overrides) {
            let invalid = |reason: String| BuildError::InvalidHeader {
                endpoint,
                name: name.to_string(),
                reason,
            };
            let header_name =
                HeaderName::try_from(name).map_err(|e| invalid(e.to_string()))?;
            let header_value =
                HeaderValue::try_from(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_write_query() {
        let params = CommonParams {
            pretty: true,
            error_trace: true,
            filter_path: Some(List::from(["took", "hits.total"])),
            ..Default::default()
        };
        let mut query = QueryParams::new();
        params.write_query(&mut query);

        assert_eq!(query.get("pretty"), Some("true"));
        assert_eq!(query.get("error_trace"), Some("true"));
        assert_eq!(query.get("human"), None);
        assert_eq!(query.get("filter_path"), Some("took,hits.total"));
    }

    #[test]
    fn test_caller_header_overrides_content_type() {
        let mut params = CommonParams::default();
        params.set_header("Content-Type", "application/vnd.custom+json");
        let headers = params
            .header_map("search", Some("application/json"))
            .unwrap();
        assert_eq!(headers["content-type"], "application/vnd.custom+json");
    }

    #[test]
    fn test_opaque_id_header() {
        let params = CommonParams {
            opaque_id: Some("job-17".to_string()),
            ..Default::default()
        };
        let headers = params.header_map("search", None).unwrap();
        assert_eq!(headers["x-opaque-id"], "job-17");
        assert!(headers.get("content-type").is_none());
    }

    #[test]
    fn test_invalid_header_name() {
        let mut params = CommonParams::default();
        params.set_header("bad header", "x");
        let err = params.header_map("search", None).unwrap_err();
        assert!(matches!(err, BuildError::InvalidHeader { ref name, .. } if name == "bad header"));
    }

    #[test]
    fn test_invalid_header_value() {
        let mut params = CommonParams::default();
        params.set_header("x-note", "line\nbreak");
        assert!(params.header_map("search", None).is_err());
    }
}
