// SPDX-License-Identifier: Apache-2.0

//! GraphQL query templates loaded from disk.
//!
//! A query named `issues_table` lives in two files inside the queries
//! directory: `issues_table.graphql` holds the query text and
//! `issues_table.vars.graphql` holds a brace-wrapped variables template such as
//!
//! ```text
//! {"first": {first}}
//! ```
//!
//! Placeholders are replaced verbatim, so string values must be quoted in the
//! template (`"{startDate}"`) and JSON values (`{filterBy}`) left bare. `{{` and
//! `}}` produce literal braces. Templates are re-read on every call.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::QueryError;

/// Placeholder name to replacement text.
pub type TemplateValues = BTreeMap<String, String>;

/// Query text plus interpolated variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedQuery {
    /// GraphQL document.
    pub query: String,
    /// Variables object.
    pub variables: Map<String, Value>,
}

/// Loads query template pairs from a directory.
#[derive(Debug, Clone)]
pub struct QueryLoader {
    dir: PathBuf,
}

impl QueryLoader {
    /// Loader rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the templates are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads `<name>.graphql` and `<name>.vars.graphql` and interpolates
    /// `values` into the variables template.
    #[instrument(skip(self, values), fields(dir = %self.dir.display()))]
    pub fn load(&self, name: &str, values: &TemplateValues) -> Result<LoadedQuery, QueryError> {
        let query = read(&self.dir.join(format!("{name}.graphql")))?;
        let template = read(&self.dir.join(format!("{name}.vars.graphql")))?;
        let variables = render_variables(&template, values)?;
        debug!(variable_count = variables.len(), "Loaded query template");
        Ok(LoadedQuery { query, variables })
    }
}

fn read(path: &Path) -> Result<String, QueryError> {
    fs::read_to_string(path).map_err(|source| QueryError::NotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Strips the outer braces, interpolates, re-wraps and parses as a JSON object.
pub fn render_variables(
    template: &str,
    values: &TemplateValues,
) -> Result<Map<String, Value>, QueryError> {
    let trimmed = template.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| {
            QueryError::MalformedTemplate("template must be wrapped in `{` and `}`".to_string())
        })?;

    let interpolated = interpolate(inner, values)?;
    serde_json::from_str(&format!("{{{interpolated}}}")).map_err(QueryError::InvalidVariables)
}

/// Replaces `{name}` with `values[name]`; `{{` and `}}` are literal braces.
pub fn interpolate(template: &str, values: &TemplateValues) -> Result<String, QueryError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(QueryError::MalformedTemplate(format!(
                                "unterminated placeholder `{{{name}`"
                            )));
                        }
                        Some(ch) => name.push(ch),
                    }
                }
                let value = values
                    .get(&name)
                    .ok_or_else(|| QueryError::UndefinedPlaceholder(name.clone()))?;
                out.push_str(value);
            }
            '}' => {
                return Err(QueryError::MalformedTemplate(
                    "single `}` encountered".to_string(),
                ));
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(pairs: &[(&str, &str)]) -> TemplateValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_render_first_placeholder() {
        let vars = render_variables("{\"first\": {first}}", &values(&[("first", "5")])).unwrap();
        assert_eq!(Value::Object(vars), json!({"first": 5}));
    }

    #[test]
    fn test_render_ignores_surrounding_newlines() {
        let vars = render_variables(
            "\n{\n  \"type\": \"{type}\"\n}\n",
            &values(&[("type", "OPEN_ISSUES")]),
        )
        .unwrap();
        assert_eq!(Value::Object(vars), json!({"type": "OPEN_ISSUES"}));
    }

    #[test]
    fn test_render_embeds_json_value() {
        let vars = render_variables(
            "{\"filterBy\": {filterBy}}",
            &values(&[("filterBy", r#"{"sourceRule": {}}"#)]),
        )
        .unwrap();
        assert_eq!(Value::Object(vars), json!({"filterBy": {"sourceRule": {}}}));
    }

    #[test]
    fn test_interpolate_escaped_braces() {
        let out = interpolate("{{\"a\": {x}}}", &values(&[("x", "1")])).unwrap();
        assert_eq!(out, "{\"a\": 1}");
    }

    #[test]
    fn test_undefined_placeholder() {
        let err = render_variables("{\"first\": {first}}", &TemplateValues::new()).unwrap_err();
        assert!(matches!(err, QueryError::UndefinedPlaceholder(name) if name == "first"));
    }

    #[test]
    fn test_unwrapped_template_is_malformed() {
        let err = render_variables("\"first\": 1", &TemplateValues::new()).unwrap_err();
        assert!(matches!(err, QueryError::MalformedTemplate(_)));
    }

    #[test]
    fn test_unterminated_placeholder_is_malformed() {
        let err = interpolate("\"a\": {first", &values(&[("first", "1")])).unwrap_err();
        assert!(matches!(err, QueryError::MalformedTemplate(_)));
    }

    #[test]
    fn test_invalid_json_after_interpolation() {
        let err = render_variables("{\"when\": {date}}", &values(&[("date", "2025-01-01")]))
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidVariables(_)));
    }

    #[test]
    fn test_loader_reads_pair() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("issues_table.graphql"), "query { issues }").unwrap();
        fs::write(
            dir.path().join("issues_table.vars.graphql"),
            "{\"first\": {first}}\n",
        )
        .unwrap();

        let loaded = QueryLoader::new(dir.path())
            .load("issues_table", &values(&[("first", "5")]))
            .unwrap();

        assert_eq!(loaded.query, "query { issues }");
        assert_eq!(Value::Object(loaded.variables), json!({"first": 5}));
    }

    #[test]
    fn test_loader_missing_query_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = QueryLoader::new(dir.path())
            .load("nope", &TemplateValues::new())
            .unwrap_err();
        match err {
            QueryError::NotFound { path, .. } => assert!(path.ends_with("nope.graphql")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_loader_missing_vars_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("half.graphql"), "query { x }").unwrap();
        let err = QueryLoader::new(dir.path())
            .load("half", &TemplateValues::new())
            .unwrap_err();
        match err {
            QueryError::NotFound { path, .. } => assert!(path.ends_with("half.vars.graphql")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_shipped_templates_render() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../wiz_queries");
        let loader = QueryLoader::new(dir);

        let table = loader
            .load("issues_table", &values(&[("first", "5")]))
            .unwrap();
        assert_eq!(table.variables["first"], json!(5));

        let issues = loader
            .load(
                "get_issues",
                &values(&[
                    ("filterBy", r#"{"sourceRule": {}}"#),
                    ("startDate", "2025-01-01T00:00:00Z"),
                    ("endDate", "2025-02-01T00:00:00Z"),
                    ("type", "OPEN_ISSUES"),
                    ("interval", "DAY"),
                ]),
            )
            .unwrap();
        assert_eq!(issues.variables["type"], json!("OPEN_ISSUES"));
        assert!(issues.query.contains("issueAnalytics"));
    }
}
