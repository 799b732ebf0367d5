//! URL building for the request executor

use crate::error::{ClientError, ClientResult};
use url::Url;

/// Builds absolute request URLs from a base URL and an endpoint
pub struct UrlBuilder;

impl UrlBuilder {
    /// Whether `endpoint` carries its own scheme and bypasses the base URL
    pub fn is_absolute(endpoint: &str) -> bool {
        let lower = endpoint.trim_start().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    /// Resolve an endpoint against the base URL.
    ///
    /// - Absolute endpoints (`https://...`) are returned unchanged
    /// - `build("https://api.example.com", "/users")` -> `https://api.example.com/users`
    /// - `build("https://api.example.com/v1", "/users")` -> `https://api.example.com/users`
    /// - `build("https://api.example.com/v1", "users")` -> `https://api.example.com/v1/users`
    pub fn build(base_url: &str, endpoint: &str) -> ClientResult<String> {
        if Self::is_absolute(endpoint) {
            return Ok(endpoint.to_string());
        }
        if base_url.trim().is_empty() {
            return Err(ClientError::InvalidConfig(format!(
                "Relative endpoint '{}' requires a base URL",
                endpoint
            )));
        }
        Self::join(base_url, endpoint)
    }

    /// Join base URL with a path. A leading slash replaces the base path,
    /// anything else is appended to it.
    ///
    /// This intentionally differs from RFC 3986 reference resolution, which
    /// would replace the last segment of `.../v1` for `users`.
    pub fn join(base_url: &str, path: &str) -> ClientResult<String> {
        let mut base = Url::parse(base_url).map_err(|e| {
            ClientError::InvalidConfig(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        if path.is_empty() {
            return Ok(base.to_string());
        }

        let result = if path.starts_with('/') {
            base.join(path)
        } else {
            // Without a trailing slash Url::join would replace the last segment
            let base_path = base.path().to_string();
            if !base_path.ends_with('/') {
                base.set_path(&format!("{}/", base_path));
            }
            base.join(path)
        }
        .map_err(|e| {
            ClientError::InvalidConfig(format!(
                "Failed to join URL '{}' with path '{}': {}",
                base_url, path, e
            ))
        })?;

        Ok(result.to_string())
    }

    /// Append query parameters to a URL, keeping any it already has
    pub fn with_query(url: &str, query_params: &[(String, String)]) -> ClientResult<String> {
        if query_params.is_empty() {
            return Ok(url.to_string());
        }

        let mut parsed = Url::parse(url)
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid URL '{}': {}", url, e)))?;
        {
            let mut pairs = parsed.query_pairs_mut();
            for (key, value) in query_params {
                pairs.append_pair(key, value);
            }
        }
        Ok(parsed.to_string())
    }
}
