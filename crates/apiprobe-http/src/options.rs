//! Per-call request options.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::error::ClientResult;

/// Request body variants
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON-encoded structured body
    Json(JsonValue),
    /// Raw bytes with an optional content type
    Raw {
        content: Vec<u8>,
        content_type: Option<String>,
    },
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
}

/// Options recognized by [`crate::ApiClient::execute`].
///
/// Merge rules relative to the session:
/// - `query` is appended to the URL
/// - `headers` are merged over the session headers, call-site wins on a
///   case-insensitive key collision
/// - `timeout` and `verify_ssl` replace the client defaults for this call only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub headers: IndexMap<String, String>,
    pub timeout: Option<Duration>,
    pub verify_ssl: Option<bool>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Serialize any value into a JSON body
    pub fn json_from<T: Serialize>(self, body: &T) -> ClientResult<Self> {
        Ok(self.json(serde_json::to_value(body)?))
    }

    pub fn raw(mut self, content: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        self.body = Some(RequestBody::Raw {
            content: content.into(),
            content_type: content_type.map(str::to_string),
        });
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }
}
