use crate::json_type::JsonType;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// What a response must satisfy. Every part is optional; unset parts are
/// not checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expectation {
    pub status: Option<u16>,
    pub max_response_time: Option<Duration>,
    pub schema: Option<JsonValue>,
    pub required_keys: Vec<String>,
    pub field_types: IndexMap<String, JsonType>,
    pub field_values: IndexMap<String, JsonValue>,
    pub headers: IndexMap<String, String>,
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn max_response_time(mut self, limit: Duration) -> Self {
        self.max_response_time = Some(limit);
        self
    }

    pub fn schema(mut self, schema: JsonValue) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn require_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn field_type(mut self, field: impl Into<String>, expected: JsonType) -> Self {
        self.field_types.insert(field.into(), expected);
        self
    }

    pub fn field_value(mut self, field: impl Into<String>, expected: JsonValue) -> Self {
        self.field_values.insert(field.into(), expected);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Whether any part of the expectation needs the decoded body
    pub fn needs_json(&self) -> bool {
        self.schema.is_some()
            || !self.required_keys.is_empty()
            || !self.field_types.is_empty()
            || !self.field_values.is_empty()
    }
}
