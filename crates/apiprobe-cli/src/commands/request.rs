use crate::error::{CliError, CliResult};
use crate::utils::{format_duration, parse_pair, truncate_text, ColoredOutput};
use apiprobe_core::{ResponseRecord, Settings};
use apiprobe_http::{ApiClient, RequestOptions};
use apiprobe_validators::{validate_response, Expectation, JsonType};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::time::Duration;

/// Everything the `request` subcommand accepts
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    pub method: String,
    pub endpoint: String,
    pub query: Vec<String>,
    pub headers: Vec<String>,
    pub data: Option<String>,
    pub timeout: Option<f64>,
    pub insecure: bool,
    pub expect_status: Option<u16>,
    pub max_time: Option<f64>,
    pub require_keys: Vec<String>,
    pub expect_types: Vec<String>,
    pub schema: Option<PathBuf>,
    pub expect_headers: Vec<String>,
    pub show_body: bool,
}

fn seconds(flag: &str, value: f64) -> CliResult<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| CliError::InvalidArgument(format!("--{} must be a non-negative number of seconds", flag)))
}

impl RequestArgs {
    pub fn request_options(&self) -> CliResult<RequestOptions> {
        let mut options = RequestOptions::new();
        for raw in &self.query {
            let (key, value) = parse_pair(raw, '=')?;
            options = options.query(key, value);
        }
        for raw in &self.headers {
            let (name, value) = parse_pair(raw, ':')?;
            options = options.header(name, value);
        }
        if let Some(data) = &self.data {
            let body: JsonValue = serde_json::from_str(data)
                .map_err(|e| CliError::InvalidArgument(format!("Invalid JSON body: {}", e)))?;
            options = options.json(body);
        }
        if let Some(timeout) = self.timeout {
            options = options.timeout(seconds("timeout", timeout)?);
        }
        if self.insecure {
            options = options.verify_ssl(false);
        }
        Ok(options)
    }

    pub fn expectation(&self) -> CliResult<Expectation> {
        let mut expectation = Expectation::new().require_keys(self.require_keys.iter().cloned());
        if let Some(status) = self.expect_status {
            expectation = expectation.status(status);
        }
        if let Some(max_time) = self.max_time {
            expectation = expectation.max_response_time(seconds("max-time", max_time)?);
        }
        for raw in &self.expect_types {
            let (field, kind) = parse_pair(raw, '=')?;
            let kind: JsonType = kind.parse().map_err(CliError::InvalidArgument)?;
            expectation = expectation.field_type(field, kind);
        }
        if let Some(path) = &self.schema {
            let content = std::fs::read_to_string(path)?;
            expectation = expectation.schema(serde_json::from_str(&content)?);
        }
        for raw in &self.expect_headers {
            let (name, value) = parse_pair(raw, ':')?;
            expectation = expectation.header(name, value);
        }
        Ok(expectation)
    }
}

pub struct RequestCommand;

impl RequestCommand {
    /// Send the request and check the response against the expectation
    pub async fn execute(settings: &Settings, args: &RequestArgs) -> CliResult<ResponseRecord> {
        let options = args.request_options()?;
        let expectation = args.expectation()?;

        let client = ApiClient::from_settings(settings);
        let response = client.request(&args.method, &args.endpoint, options).await?;
        validate_response(&response, &expectation)?;
        Ok(response)
    }

    pub async fn run(settings: &Settings, args: RequestArgs) -> CliResult<()> {
        let response = Self::execute(settings, &args).await?;

        println!(
            "{} {} {} {}",
            ColoredOutput::success(&response.status().to_string()),
            args.method.to_uppercase(),
            args.endpoint,
            ColoredOutput::dim(&format_duration(response.elapsed()))
        );
        if args.show_body {
            match response.json() {
                Ok(body) => println!("{}", serde_json::to_string_pretty(body)?),
                Err(_) => println!("{}", truncate_text(&response.text(), 2000)),
            }
        }
        Ok(())
    }
}
