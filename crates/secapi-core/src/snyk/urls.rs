// SPDX-License-Identifier: Apache-2.0

//! URL construction for Snyk endpoints.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters gets encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered query parameters.
pub type QueryParams = Vec<(String, String)>;

/// Right-biased ordered merge of query parameters.
///
/// Keys from `overrides` replace existing values in place; new keys are
/// appended in the order given.
#[must_use]
pub fn merge_params(base: QueryParams, overrides: &[(String, String)]) -> QueryParams {
    let mut merged = base;
    for (key, value) in overrides {
        if let Some(existing) = merged.iter_mut().find(|(k, _)| k == key) {
            existing.1.clone_from(value);
        } else {
            merged.push((key.clone(), value.clone()));
        }
    }
    merged
}

/// Renders `?k1=v1&k2=v2`, or an empty string for no params.
#[must_use]
pub fn generate_url_params(params: &[(String, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_VALUE),
                utf8_percent_encode(v, QUERY_VALUE)
            )
        })
        .collect();
    format!("?{}", pairs.join("&"))
}

/// Appends `params` to `url`; an empty list leaves the URL unchanged.
#[must_use]
pub fn add_query_params(url: &str, params: &[(String, String)]) -> String {
    format!("{url}{}", generate_url_params(params))
}

/// Builds a params list from string pairs.
pub fn params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_query_params_empty_keeps_url() {
        assert_eq!(
            add_query_params("https://api.snyk.io/v1/orgs", &[]),
            "https://api.snyk.io/v1/orgs"
        );
    }

    #[test]
    fn test_add_query_params_keeps_order() {
        let url = add_query_params(
            "https://api.snyk.io/rest/orgs/o1/audit_logs/search",
            &params([("version", "2025-01-01"), ("sort", "asc")]),
        );
        assert_eq!(
            url,
            "https://api.snyk.io/rest/orgs/o1/audit_logs/search?version=2025-01-01&sort=asc"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let url = add_query_params("https://x", &params([("q", "a b&c=d")]));
        assert_eq!(url, "https://x?q=a%20b%26c%3Dd");
    }

    #[test]
    fn test_merge_params_replaces_in_place() {
        let merged = merge_params(
            params([("version", "2025-01-01"), ("size", "10")]),
            &params([("version", "2024-10-15"), ("sort", "asc")]),
        );
        assert_eq!(
            merged,
            params([("version", "2024-10-15"), ("size", "10"), ("sort", "asc")])
        );
    }
}
