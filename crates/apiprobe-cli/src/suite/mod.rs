//! Built-in REST test suite for a JSONPlaceholder-style API.
//!
//! Every case receives its own [`CaseContext`] with a freshly built client,
//! so cases never share session state and can run concurrently.

mod auth;
mod data_validation;
mod endpoints;
mod smoke;

use anyhow::Context;
use apiprobe_core::{EndpointTable, ResponseRecord};
use apiprobe_http::ApiClient;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

const BUNDLED_ENDPOINTS: &str = include_str!("../../../../config/endpoints.json");

/// Endpoint table shipped with the binary
pub fn bundled_endpoints() -> anyhow::Result<EndpointTable> {
    EndpointTable::from_json(BUNDLED_ENDPOINTS).context("bundled endpoint table is invalid")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Users,
    Posts,
    Comments,
    Smoke,
    Auth,
    DataValidation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Users => "users",
            Category::Posts => "posts",
            Category::Comments => "comments",
            Category::Smoke => "smoke",
            Category::Auth => "auth",
            Category::DataValidation => "data_validation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a case gets to work with
pub struct CaseContext {
    pub client: ApiClient,
    pub endpoints: Arc<EndpointTable>,
}

impl CaseContext {
    /// Resolve an endpoint-table path
    pub fn path(&self, category: &str, action: &str, params: &[(&str, &str)]) -> anyhow::Result<String> {
        Ok(self.endpoints.resolve(category, action, params)?)
    }
}

pub type CaseFn = fn(CaseContext) -> BoxFuture<'static, anyhow::Result<()>>;

#[derive(Clone, Copy)]
pub struct TestCase {
    pub category: Category,
    pub name: &'static str,
    pub run: CaseFn,
}

impl TestCase {
    pub fn new(category: Category, name: &'static str, run: CaseFn) -> Self {
        Self { category, name, run }
    }

    /// `category::name`
    pub fn id(&self) -> String {
        format!("{}::{}", self.category, self.name)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// All built-in cases in declaration order
pub fn all_cases() -> Vec<TestCase> {
    let mut cases = Vec::new();
    cases.extend(endpoints::cases());
    cases.extend(smoke::cases());
    cases.extend(auth::cases());
    cases.extend(data_validation::cases());
    cases
}

/// Decoded body of a response, with the status in the error context
fn json_body(response: &ResponseRecord) -> anyhow::Result<&JsonValue> {
    response
        .json()
        .with_context(|| format!("response with status {} is not JSON", response.status()))
}

fn as_array(value: &JsonValue) -> anyhow::Result<&Vec<JsonValue>> {
    value
        .as_array()
        .with_context(|| format!("expected a JSON array, got {}", value))
}
