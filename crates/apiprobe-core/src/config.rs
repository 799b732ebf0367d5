//! Client configuration and environment-driven settings.

use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 1.0;

/// Immutable configuration handed to the request executor at construction.
///
/// The executor keeps its own copy and re-reads it on every request; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL that relative endpoints are joined onto. May be empty when
    /// every request uses an absolute URL.
    pub base_url: String,
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Total number of attempts for one logical request
    pub retry_count: u32,
    /// Fixed pause between unsuccessful attempts
    pub retry_delay: Duration,
    /// Whether TLS certificates are verified
    pub verify_ssl: bool,
    /// Headers added to the session on top of the JSON defaults
    pub default_headers: IndexMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: Duration::from_secs_f64(DEFAULT_RETRY_DELAY_SECS),
            verify_ssl: true,
            default_headers: IndexMap::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

/// Settings read from the process environment (and an optional `.env` file).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub auth_token: String,
    pub timeout: Duration,
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub verify_ssl: bool,
    pub environment: String,
    pub log_level: String,
    pub parallel_workers: usize,
    pub report_dir: PathBuf,
    pub json_report: bool,
    pub endpoints_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            auth_token: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: Duration::from_secs_f64(DEFAULT_RETRY_DELAY_SECS),
            verify_ssl: true,
            environment: "test".to_string(),
            log_level: "INFO".to_string(),
            parallel_workers: 4,
            report_dir: PathBuf::from("reports"),
            json_report: false,
            endpoints_file: PathBuf::from("config/endpoints.json"),
        }
    }
}

impl Settings {
    /// Load a `.env` file from the working directory (if any), then read the
    /// process environment.
    pub fn load() -> CoreResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(CoreError::Invalid(format!("Failed to load .env file: {}", e))),
        }
        Self::from_env()
    }

    /// Read settings from the process environment
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// Missing variables fall back to defaults; present but unparseable
    /// values are rejected.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let timeout = match get("TIMEOUT") {
            Some(raw) => Duration::from_secs(parse_number::<u64>("TIMEOUT", &raw)?),
            None => defaults.timeout,
        };
        let retry_count = match get("RETRY_COUNT") {
            Some(raw) => parse_number::<u32>("RETRY_COUNT", &raw)?,
            None => defaults.retry_count,
        };
        let retry_delay = match get("RETRY_DELAY") {
            Some(raw) => parse_seconds("RETRY_DELAY", &raw)?,
            None => defaults.retry_delay,
        };
        let parallel_workers = match get("PARALLEL_WORKERS") {
            Some(raw) => parse_number::<usize>("PARALLEL_WORKERS", &raw)?.max(1),
            None => defaults.parallel_workers,
        };

        Ok(Self {
            base_url: get("API_BASE_URL").unwrap_or(defaults.base_url),
            api_key: get("API_KEY").unwrap_or_default(),
            auth_token: get("AUTH_TOKEN").unwrap_or_default(),
            timeout,
            retry_count,
            retry_delay,
            verify_ssl: get("VERIFY_SSL").map(|v| is_true(&v)).unwrap_or(defaults.verify_ssl),
            environment: get("TEST_ENV").unwrap_or(defaults.environment),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            parallel_workers,
            report_dir: get("REPORT_DIR").map(PathBuf::from).unwrap_or(defaults.report_dir),
            json_report: get("GENERATE_JSON_REPORT")
                .map(|v| is_true(&v))
                .unwrap_or(defaults.json_report),
            endpoints_file: get("ENDPOINTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.endpoints_file),
        })
    }

    /// Build the executor configuration described by these settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            retry_count: self.retry_count,
            retry_delay: self.retry_delay,
            verify_ssl: self.verify_ssl,
            default_headers: IndexMap::new(),
        }
    }

    /// Authentication headers derived from `AUTH_TOKEN` and `API_KEY`
    pub fn auth_headers(&self) -> IndexMap<String, String> {
        let mut headers = IndexMap::new();
        if !self.auth_token.is_empty() {
            headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", self.auth_token),
            );
        }
        if !self.api_key.is_empty() {
            headers.insert("X-API-Key".to_string(), self.api_key.clone());
        }
        headers
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn is_staging(&self) -> bool {
        self.environment.eq_ignore_ascii_case("staging")
    }

    pub fn is_test(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "test" || env == "testing"
    }
}

fn is_true(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

fn parse_number<T>(key: &str, raw: &str) -> CoreResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| CoreError::Invalid(format!("{} must be a non-negative integer, got '{}': {}", key, raw, e)))
}

fn parse_seconds(key: &str, raw: &str) -> CoreResult<Duration> {
    let secs: f64 = raw
        .parse()
        .map_err(|e| CoreError::Invalid(format!("{} must be a number of seconds, got '{}': {}", key, raw, e)))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| CoreError::Invalid(format!("{} is out of range ('{}'): {}", key, raw, e)))
}
