//! Static endpoint-path table keyed by `(category, action)`.
//!
//! Paths may contain `{name}` placeholders that are filled by simple
//! substitution before the path is handed to the request executor.

use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointTable {
    categories: IndexMap<String, IndexMap<String, String>>,
}

impl EndpointTable {
    /// Load a table from a JSON file. A missing file yields an empty table.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Endpoint file not found, using empty table");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn insert(
        &mut self,
        category: impl Into<String>,
        action: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(action.into(), path.into());
    }

    /// Raw path template for an entry
    pub fn get(&self, category: &str, action: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|actions| actions.get(action))
            .map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Resolve an entry and substitute its placeholders.
    ///
    /// Every placeholder in the template must have a matching parameter.
    /// Extra parameters are ignored.
    pub fn resolve(&self, category: &str, action: &str, params: &[(&str, &str)]) -> CoreResult<String> {
        let template = self.get(category, action).ok_or_else(|| {
            CoreError::NotFound(format!("endpoint '{}.{}'", category, action))
        })?;

        let mut missing = Vec::new();
        let resolved = PLACEHOLDER.replace_all(template, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match params.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => (*value).to_string(),
                None => {
                    missing.push(name.to_string());
                    caps[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            return Err(CoreError::Invalid(format!(
                "endpoint '{}.{}' is missing parameters: {}",
                category,
                action,
                missing.join(", ")
            )));
        }

        Ok(resolved.into_owned())
    }

    /// Base URL concatenated with the resolved path
    pub fn full_url(
        &self,
        base_url: &str,
        category: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> CoreResult<String> {
        let path = self.resolve(category, action, params)?;
        Ok(format!("{}{}", base_url, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EndpointTable {
        EndpointTable::from_json(
            r#"{
                "users": {"list": "/users", "get": "/users/{id}"},
                "posts": {"comments": "/posts/{post_id}/comments?page={page}"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_get_known_and_unknown_entries() {
        let table = table();
        assert_eq!(table.get("users", "list"), Some("/users"));
        assert_eq!(table.get("users", "missing"), None);
        assert_eq!(table.get("nope", "list"), None);
    }

    #[test]
    fn test_resolve_substitutes_placeholders() {
        let table = table();
        assert_eq!(table.resolve("users", "get", &[("id", "7")]).unwrap(), "/users/7");
        assert_eq!(
            table
                .resolve("posts", "comments", &[("page", "2"), ("post_id", "1"), ("extra", "x")])
                .unwrap(),
            "/posts/1/comments?page=2"
        );
    }

    #[test]
    fn test_resolve_reports_missing_parameters() {
        let err = table().resolve("posts", "comments", &[("page", "1")]).unwrap_err();
        assert!(matches!(err, CoreError::Invalid(msg) if msg.contains("post_id")));
    }

    #[test]
    fn test_resolve_unknown_entry_is_not_found() {
        let err = table().resolve("users", "purge", &[]).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_full_url_concatenates() {
        let url = table()
            .full_url("https://api.example.com", "users", "get", &[("id", "1")])
            .unwrap();
        assert_eq!(url, "https://api.example.com/users/1");
    }

    #[test]
    fn test_insert_builds_table() {
        let mut table = EndpointTable::default();
        assert!(table.is_empty());
        table.insert("comments", "get", "/comments/{id}");
        assert_eq!(table.categories().collect::<Vec<_>>(), vec!["comments"]);
        assert_eq!(table.resolve("comments", "get", &[("id", "3")]).unwrap(), "/comments/3");
    }
}
