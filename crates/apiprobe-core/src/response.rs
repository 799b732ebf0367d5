//! Result of one HTTP exchange.

use crate::error::{CoreError, CoreResult};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::Duration;

/// Status, headers, raw body and elapsed time of a completed exchange.
///
/// The body is decoded as JSON on first access and the outcome is cached, so
/// repeated calls to [`ResponseRecord::json`] return the same document.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    elapsed: Duration,
    decoded: OnceCell<Result<JsonValue, String>>,
}

impl ResponseRecord {
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: impl Into<Vec<u8>>,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            elapsed,
            decoded: OnceCell::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Wall-clock time measured around the transport call
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Decoded JSON body. Fails with [`CoreError::Decode`] when the body is
    /// not valid JSON.
    pub fn json(&self) -> CoreResult<&JsonValue> {
        self.decoded
            .get_or_init(|| serde_json::from_slice(&self.body).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| CoreError::Decode(e.clone()))
    }

    /// Deserialize the body into a typed value
    pub fn json_as<T: DeserializeOwned>(&self) -> CoreResult<T> {
        let value = self.json()?.clone();
        serde_json::from_value(value).map_err(|e| CoreError::Decode(e.to_string()))
    }
}
