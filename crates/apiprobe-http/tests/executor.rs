use apiprobe_http::{ApiClient, ClientConfig, ClientError, RequestOptions, Sleeper};
use async_trait::async_trait;
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records requested pauses instead of waiting
#[derive(Default)]
struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

fn client_for(base_url: &str, retry_count: u32) -> (ApiClient, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let config = ClientConfig::new(base_url)
        .with_retry_count(retry_count)
        .with_retry_delay(Duration::from_millis(250))
        .with_timeout(Duration::from_secs(5));
    let client = ApiClient::new(config).with_sleeper(sleeper.clone());
    (client, sleeper)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_errors_exhaust_retries_and_return_last_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/flaky");
            then.status(503).json_body(json!({"error": "unavailable"}));
        })
        .await;

    let (client, sleeper) = client_for(&server.base_url(), 3);
    let response = client.get("/flaky", RequestOptions::new()).await.unwrap();

    assert_eq!(response.status(), 503);
    assert_eq!(response.json().unwrap()["error"], "unavailable");
    mock.assert_hits_async(3).await;
    assert_eq!(sleeper.calls(), vec![Duration::from_millis(250); 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start_async().await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/9999");
            then.status(404).json_body(json!({}));
        })
        .await;
    let found = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/1");
            then.status(200).json_body(json!({"id": 1}));
        })
        .await;

    let (client, sleeper) = client_for(&server.base_url(), 5);

    let response = client.get("/users/9999", RequestOptions::new()).await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.json().unwrap(), &json!({}));

    let response = client.get("/users/1", RequestOptions::new()).await.unwrap();
    assert_eq!(response.status(), 200);

    missing.assert_hits_async(1).await;
    found.assert_hits_async(1).await;
    assert!(sleeper.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_transport_errors_raise_after_all_attempts() {
    // Nothing listens on port 1
    let (client, sleeper) = client_for("http://127.0.0.1:1", 3);
    let err = client.get("/users", RequestOptions::new()).await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {:?}", err);
    assert_eq!(sleeper.calls().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_zero_retry_count_makes_one_attempt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/down");
            then.status(500);
        })
        .await;

    let (client, sleeper) = client_for(&server.base_url(), 0);
    let response = client.get("/down", RequestOptions::new()).await.unwrap();

    assert_eq!(response.status(), 500);
    mock.assert_hits_async(1).await;
    assert!(sleeper.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_per_call_timeout_is_a_transport_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_millis(800));
        })
        .await;

    let (client, sleeper) = client_for(&server.base_url(), 2);
    let err = client
        .get("/slow", RequestOptions::new().timeout(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout(_)), "unexpected error: {:?}", err);
    assert_eq!(sleeper.calls().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_auth_token_header_is_sent() {
    let server = MockServer::start_async().await;
    let bearer = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/me")
                .header("Authorization", "Bearer abc");
            then.status(200);
        })
        .await;
    let token = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/legacy")
                .header("Authorization", "Token abc");
            then.status(200);
        })
        .await;

    let (mut client, _) = client_for(&server.base_url(), 1);
    client.set_auth_token("abc", None);
    assert_eq!(client.get("/me", RequestOptions::new()).await.unwrap().status(), 200);

    client.set_auth_token("abc", Some("Token"));
    assert_eq!(client.get("/legacy", RequestOptions::new()).await.unwrap().status(), 200);

    bearer.assert_hits_async(1).await;
    token.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_clear_auth_keeps_api_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/posts")
                .header("X-API-Key", "secret-key")
                .matches(|req| {
                    !req.headers
                        .iter()
                        .flatten()
                        .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                });
            then.status(200).json_body(json!([]));
        })
        .await;

    let (mut client, _) = client_for(&server.base_url(), 1);
    client.set_api_key("secret-key", None);
    client.set_auth_token("abc", None);
    client.set_basic_auth("u", "p");
    client.clear_auth();

    let response = client.get("/posts", RequestOptions::new()).await.unwrap();
    assert_eq!(response.status(), 200);
    mock.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_basic_auth_is_encoded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/private")
                .header("Authorization", "Basic dTpw");
            then.status(200);
        })
        .await;

    let (mut client, _) = client_for(&server.base_url(), 1);
    client.set_basic_auth("u", "p");
    let response = client.get("/private", RequestOptions::new()).await.unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_call_site_headers_override_session() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users")
                .header("Authorization", "Bearer custom")
                .header("Accept", "application/json")
                .header("X-Request-Id", "req-1");
            then.status(200);
        })
        .await;

    let (mut client, _) = client_for(&server.base_url(), 1);
    client.set_auth_token("default", None);

    let options = RequestOptions::new()
        .header("authorization", "Bearer custom")
        .header("X-Request-Id", "req-1");
    client.get("/users", options).await.unwrap();

    mock.assert_hits_async(1).await;
    // The session keeps its own value
    assert_eq!(client.header("Authorization"), Some("Bearer default"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_query_and_json_body_are_sent() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/comments").query_param("postId", "1");
            then.status(200).json_body(json!([{"postId": 1, "id": 1}]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/posts")
                .header("Content-Type", "application/json")
                .json_body(json!({"title": "hello", "userId": 1}));
            then.status(201).json_body(json!({"id": 101, "title": "hello", "userId": 1}));
        })
        .await;

    let (client, _) = client_for(&server.base_url(), 1);

    let response = client
        .get("/comments", RequestOptions::new().query("postId", "1"))
        .await
        .unwrap();
    assert_eq!(response.json().unwrap()[0]["postId"], 1);

    let response = client
        .request(
            "post",
            "/posts",
            RequestOptions::new().json(json!({"title": "hello", "userId": 1})),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.json().unwrap()["id"], 101);

    list.assert_hits_async(1).await;
    create.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_form_and_raw_bodies() {
    let server = MockServer::start_async().await;
    let form = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/form")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body("name=Jane+Doe");
            then.status(200);
        })
        .await;
    let raw = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path("/raw")
                .header("Content-Type", "text/plain")
                .body("plain text");
            then.status(200);
        })
        .await;

    let (client, _) = client_for(&server.base_url(), 1);
    client
        .put(
            "/form",
            RequestOptions::new().form(vec![("name".to_string(), "Jane Doe".to_string())]),
        )
        .await
        .unwrap();
    client
        .patch("/raw", RequestOptions::new().raw("plain text", Some("text/plain")))
        .await
        .unwrap();

    form.assert_hits_async(1).await;
    raw.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_absolute_url_bypasses_base() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/posts/1");
            then.status(200).json_body(json!({}));
        })
        .await;

    // Base URL points somewhere unreachable
    let (client, _) = client_for("http://127.0.0.1:1/api", 1);
    let response = client
        .delete(&server.url("/posts/1"), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_response_record_captures_headers_and_elapsed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/1");
            then.status(200)
                .header("Content-Type", "application/json; charset=utf-8")
                .body(r#"{"id": 1, "name": "Leanne Graham"}"#)
                .delay(Duration::from_millis(50));
        })
        .await;

    let (client, _) = client_for(&server.base_url(), 1);
    let response = client.get("/users/1", RequestOptions::new()).await.unwrap();

    assert_eq!(
        response.header("content-type"),
        Some("application/json; charset=utf-8")
    );
    assert!(response.elapsed() >= Duration::from_millis(50));
    let first = response.json().unwrap().clone();
    assert_eq!(response.json().unwrap(), &first);
    assert_eq!(first["name"], "Leanne Graham");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_closed_client_rejects_requests() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let (mut client, _) = client_for(&server.base_url(), 1);
    client.close();
    let err = client.get("/users", RequestOptions::new()).await.unwrap_err();

    assert!(matches!(err, ClientError::Closed));
    mock.assert_hits_async(0).await;
}
