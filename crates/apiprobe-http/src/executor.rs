use crate::client_cache::ClientCache;
use crate::error::{ClientError, ClientResult};
use crate::method::HttpMethod;
use crate::options::{RequestBody, RequestOptions};
use crate::retry_manager::{AttemptOutcome, RetryDecision, RetryPolicy};
use crate::session::{BasicCredentials, Session, AUTHORIZATION};
use crate::sleeper::{Sleeper, TokioSleeper};
use crate::timeout_manager::TimeoutManager;
use crate::url_builder::UrlBuilder;
use apiprobe_core::{ClientConfig, ResponseRecord, Settings};
use indexmap::IndexMap;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

const CONTENT_TYPE: &str = "Content-Type";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client with retry logic, session headers and authentication state.
///
/// The connection session is released when the client is dropped, so a
/// client scoped to a block is always cleaned up; [`ApiClient::close`]
/// releases it early.
pub struct ApiClient {
    config: ClientConfig,
    session: Session,
    clients: Option<ClientCache>,
    sleeper: Arc<dyn Sleeper>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        tracing::debug!(base_url = %config.base_url, "creating API client");
        Self {
            session: Session::new(&config.default_headers),
            config,
            clients: Some(ClientCache::new()),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Client configured from environment settings, with the configured
    /// token and API key already applied
    pub fn from_settings(settings: &Settings) -> Self {
        let mut client = Self::new(settings.client_config());
        if !settings.auth_token.is_empty() {
            client.set_auth_token(&settings.auth_token, None);
        }
        if !settings.api_key.is_empty() {
            client.set_api_key(&settings.api_key, None);
        }
        client
    }

    /// Replace the sleeper used between retry attempts
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_headers(&self) -> &IndexMap<String, String> {
        self.session.headers()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.session.header(name)
    }

    pub fn basic_auth(&self) -> Option<&BasicCredentials> {
        self.session.basic_auth()
    }

    pub fn is_closed(&self) -> bool {
        self.clients.is_none()
    }

    /// Set `Authorization: {token_type} {token}`, `Bearer` unless given
    pub fn set_auth_token(&mut self, token: &str, token_type: Option<&str>) {
        let token_type = token_type.unwrap_or(DEFAULT_TOKEN_TYPE);
        self.session
            .set_header(AUTHORIZATION, format!("{} {}", token_type, token));
        tracing::info!(token_type, "Auth token set");
    }

    /// Set an API key header, `X-API-Key` unless given
    pub fn set_api_key(&mut self, api_key: &str, header_name: Option<&str>) {
        let header_name = header_name.unwrap_or(DEFAULT_API_KEY_HEADER);
        self.session.set_header(header_name, api_key);
        tracing::info!(header = header_name, "API key set");
    }

    pub fn set_basic_auth(&mut self, username: &str, password: &str) {
        self.session.set_basic_auth(username, password);
        tracing::info!(username, "Basic auth set");
    }

    /// Remove the `Authorization` header and basic-auth credentials.
    /// API key headers are ordinary session headers and stay in place.
    pub fn clear_auth(&mut self) {
        self.session.remove_header(AUTHORIZATION);
        self.session.clear_basic_auth();
        tracing::info!("Authentication cleared");
    }

    /// Release the connection session. Later requests fail with
    /// [`ClientError::Closed`]; calling this twice is harmless.
    pub fn close(&mut self) {
        if self.clients.take().is_some() {
            tracing::debug!("API client session closed");
        }
    }

    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> ClientResult<ResponseRecord> {
        self.execute(HttpMethod::Get, endpoint, options).await
    }

    pub async fn post(&self, endpoint: &str, options: RequestOptions) -> ClientResult<ResponseRecord> {
        self.execute(HttpMethod::Post, endpoint, options).await
    }

    pub async fn put(&self, endpoint: &str, options: RequestOptions) -> ClientResult<ResponseRecord> {
        self.execute(HttpMethod::Put, endpoint, options).await
    }

    pub async fn patch(&self, endpoint: &str, options: RequestOptions) -> ClientResult<ResponseRecord> {
        self.execute(HttpMethod::Patch, endpoint, options).await
    }

    pub async fn delete(&self, endpoint: &str, options: RequestOptions) -> ClientResult<ResponseRecord> {
        self.execute(HttpMethod::Delete, endpoint, options).await
    }

    /// Like [`ApiClient::execute`] with the method given as text
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<ResponseRecord> {
        let method: HttpMethod = method.parse()?;
        self.execute(method, endpoint, options).await
    }

    /// Execute one logical request.
    ///
    /// Transport failures and 5xx responses are retried up to the configured
    /// attempt count with a fixed delay. Responses below 500 are returned at
    /// once. When attempts run out, a 5xx response is returned while a
    /// transport failure is raised.
    pub async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<ResponseRecord> {
        let clients = self.clients.as_ref().ok_or(ClientError::Closed)?;

        let url = UrlBuilder::build(&self.config.base_url, endpoint)?;
        let url = UrlBuilder::with_query(&url, &options.query)?;

        let verify_ssl = options.verify_ssl.unwrap_or(self.config.verify_ssl);
        let client = clients.get_client(verify_ssl)?;
        let timeout_manager = TimeoutManager::new(options.timeout.unwrap_or(self.config.timeout));
        let policy = RetryPolicy::from_config(&self.config);

        let (body, content_type) = encode_body(options.body)?;
        let mut headers = self.session.merged_headers(&options.headers);
        if let Some(content_type) = content_type {
            if !options.headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE)) {
                headers.retain(|k, _| !k.eq_ignore_ascii_case(CONTENT_TYPE));
                headers.insert(CONTENT_TYPE.to_string(), content_type);
            }
        }

        let mut attempt = 1;
        loop {
            tracing::info!(
                "[{}] {} (Attempt {}/{})",
                method,
                url,
                attempt,
                policy.max_attempts()
            );

            let result = self
                .send_once(client, method, &url, &headers, body.as_deref(), &timeout_manager)
                .await;

            match policy.decide(AttemptOutcome::of(&result), attempt) {
                RetryDecision::Retry { delay } => {
                    match &result {
                        Ok(response) => tracing::warn!(
                            status = response.status(),
                            "Server error, retrying in {:?}",
                            delay
                        ),
                        Err(e) => tracing::warn!(error = %e, "Request failed, retrying in {:?}", delay),
                    }
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                RetryDecision::Return => return result,
                RetryDecision::Raise => {
                    if let Err(e) = &result {
                        tracing::error!(error = %e, attempts = attempt, "Request failed");
                    }
                    return result;
                }
            }
        }
    }

    async fn send_once(
        &self,
        client: &reqwest::Client,
        method: HttpMethod,
        url: &str,
        headers: &IndexMap<String, String>,
        body: Option<&[u8]>,
        timeout_manager: &TimeoutManager,
    ) -> ClientResult<ResponseRecord> {
        let mut builder = client
            .request(method.to_reqwest(), url)
            .timeout(timeout_manager.timeout());
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = self.session.basic_auth() {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }

        let start = Instant::now();
        let (status, headers, body) = timeout_manager
            .execute_with_timeout(async move {
                let response = builder.send().await?;
                let status = response.status().as_u16();
                let headers = collect_headers(response.headers());
                let body = response.bytes().await?;
                Ok::<_, reqwest::Error>((status, headers, body))
            })
            .await?;
        let elapsed = start.elapsed();

        tracing::info!(
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Response received"
        );
        Ok(ResponseRecord::new(status, headers, body.to_vec(), elapsed))
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Encoded body bytes plus the content type the body kind implies
fn encode_body(body: Option<RequestBody>) -> ClientResult<(Option<Vec<u8>>, Option<String>)> {
    Ok(match body {
        None => (None, None),
        Some(RequestBody::Json(value)) => (Some(serde_json::to_vec(&value)?), None),
        Some(RequestBody::Raw {
            content,
            content_type,
        }) => (Some(content), content_type),
        Some(RequestBody::Form(fields)) => {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields.iter())
                .finish();
            (Some(encoded.into_bytes()), Some(FORM_CONTENT_TYPE.to_string()))
        }
    })
}

fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected = HashMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            collected
                .entry(name.to_string())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> ApiClient {
        ApiClient::new(ClientConfig::new("https://api.example.com"))
    }

    #[test]
    fn test_auth_setters_update_session() {
        let mut client = client();
        client.set_auth_token("abc", None);
        assert_eq!(client.header("authorization"), Some("Bearer abc"));

        client.set_auth_token("abc", Some("Token"));
        assert_eq!(client.header(AUTHORIZATION), Some("Token abc"));

        client.set_api_key("k-1", None);
        client.set_api_key("k-2", Some("X-Custom-Key"));
        client.set_basic_auth("u", "p");
        client.clear_auth();

        assert_eq!(client.header(AUTHORIZATION), None);
        assert!(client.basic_auth().is_none());
        assert_eq!(client.header(DEFAULT_API_KEY_HEADER), Some("k-1"));
        assert_eq!(client.header("x-custom-key"), Some("k-2"));
    }

    #[test]
    fn test_from_settings_applies_credentials() {
        let settings = Settings::from_lookup(|key| match key {
            "AUTH_TOKEN" => Some("tok".to_string()),
            "API_KEY" => Some("key".to_string()),
            _ => None,
        })
        .unwrap();
        let client = ApiClient::from_settings(&settings);
        assert_eq!(client.header(AUTHORIZATION), Some("Bearer tok"));
        assert_eq!(client.header(DEFAULT_API_KEY_HEADER), Some("key"));
        assert_eq!(client.config().base_url, settings.base_url);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut client = client();
        assert!(!client.is_closed());
        client.close();
        client.close();
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn test_requests_after_close_fail() {
        let mut client = client();
        client.close();
        let err = client.get("/users", RequestOptions::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::Closed));
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let err = client()
            .request("TRACE", "/users", RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidMethod(_)));
    }

    #[test]
    fn test_form_body_encoding() {
        let (body, content_type) = encode_body(Some(RequestBody::Form(vec![
            ("name".to_string(), "Jane Doe".to_string()),
            ("role".to_string(), "a&b".to_string()),
        ])))
        .unwrap();
        assert_eq!(body.unwrap(), b"name=Jane+Doe&role=a%26b".to_vec());
        assert_eq!(content_type.as_deref(), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_json_body_keeps_session_content_type() {
        let (body, content_type) =
            encode_body(Some(RequestBody::Json(serde_json::json!({"a": 1})))).unwrap();
        assert_eq!(body.unwrap(), br#"{"a":1}"#.to_vec());
        assert_eq!(content_type, None);
    }
}
