//! Path template resolution.

/// Percent-encodes one path value.
///
/// `,` and `*` stay literal so multi-target (`logs-1,logs-2`) and wildcard
/// (`logs-*`) expressions reach the engine unchanged.
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%2C", ",")
        .replace("%2A", "*")
}

/// Returns `true` for `.` and `..`, which URL parsing collapses out of a
/// path whether or not they are percent-encoded.
pub fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}

/// Extracts placeholder names from a template, in order of appearance.
///
/// ## Examples
///
/// ```rust
/// use sift::endpoint::path::placeholders;
///
/// assert_eq!(placeholders("/{index}/_doc/{id}"), vec!["index", "id"]);
/// ```
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else { break };
        if end > 0 {
            names.push(&after[..end]);
        }
        rest = &after[end + 1..];
    }
    names
}

/// Fills a single template, or returns `None` if a placeholder has no
/// non-empty value.
pub fn substitute(template: &str, params: &[(&'static str, String)]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}')?;
        let name = &after[..end];
        let value = params
            .iter()
            .find(|(key, value)| *key == name && !value.is_empty())
            .map(|(_, value)| value)?;
        out.push_str(&encode_segment(value));
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Some(out)
}

/// Picks the first template in `templates` that can be filled from `params`.
pub fn resolve(templates: &[&str], params: &[(&'static str, String)]) -> Option<String> {
    templates
        .iter()
        .find_map(|template| substitute(template, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dot_segment() {
        assert!(is_dot_segment("."));
        assert!(is_dot_segment(".."));
        assert!(!is_dot_segment("..."));
        assert!(!is_dot_segment(".kibana"));
    }

    fn params(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/_cluster/health"), Vec::<&str>::new());
        assert_eq!(
            placeholders("/{index}/_settings/{name}"),
            vec!["index", "name"]
        );
    }

    #[test]
    fn test_substitute() {
        let path = substitute("/{index}/_doc/{id}", &params(&[("index", "logs"), ("id", "42")]));
        assert_eq!(path.as_deref(), Some("/logs/_doc/42"));
    }

    #[test]
    fn test_substitute_missing_param() {
        assert_eq!(substitute("/{index}/_doc/{id}", &params(&[("index", "logs")])), None);
    }

    #[test]
    fn test_substitute_rejects_empty_value() {
        assert_eq!(substitute("/{index}/_search", &params(&[("index", "")])), None);
    }

    #[test]
    fn test_encodes_reserved_characters() {
        let path = substitute(
            "/{index}/_doc/{id}",
            &params(&[("index", "logs"), ("id", "a/b c?")]),
        );
        assert_eq!(path.as_deref(), Some("/logs/_doc/a%2Fb%20c%3F"));
    }

    #[test]
    fn test_keeps_list_and_wildcard_characters() {
        assert_eq!(encode_segment("logs-*,metrics"), "logs-*,metrics");
    }

    #[test]
    fn test_resolve_prefers_first_filled_template() {
        let templates = ["/{index}/_search", "/_search"];
        assert_eq!(
            resolve(&templates, &params(&[("index", "a,b")])).as_deref(),
            Some("/a,b/_search")
        );
        assert_eq!(resolve(&templates, &[]).as_deref(), Some("/_search"));
    }
}
