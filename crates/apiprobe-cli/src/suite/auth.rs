//! Authentication cases. The public test API ignores credentials, so these
//! check the session state and that authenticated requests still succeed.

use super::{CaseContext, Category, TestCase};
use anyhow::{ensure, Result};
use apiprobe_http::RequestOptions;
use apiprobe_validators::validate_status_code;
use futures::future::{BoxFuture, FutureExt};

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(Category::Auth, "request_with_bearer_token", request_with_bearer_token),
        TestCase::new(Category::Auth, "request_with_api_key", request_with_api_key),
        TestCase::new(Category::Auth, "request_with_basic_auth", request_with_basic_auth),
        TestCase::new(Category::Auth, "clear_authentication", clear_authentication),
        TestCase::new(Category::Auth, "switch_auth_methods", switch_auth_methods),
        TestCase::new(Category::Auth, "auth_header_override", auth_header_override),
        TestCase::new(Category::Auth, "different_token_types", different_token_types),
    ]
}

fn request_with_bearer_token(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, endpoints } = ctx;
        client.set_auth_token("test_token", None);
        ensure!(client.header("Authorization") == Some("Bearer test_token"));

        let path = endpoints.resolve("users", "get", &[("id", "1")])?;
        validate_status_code(&client.get(&path, RequestOptions::new()).await?, 200)?;
        Ok(())
    }
    .boxed()
}

fn request_with_api_key(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, endpoints } = ctx;
        client.set_api_key("test_key", None);
        client.set_api_key("custom_key", Some("X-Custom-API-Key"));
        ensure!(client.header("X-API-Key") == Some("test_key"));
        ensure!(client.header("X-Custom-API-Key") == Some("custom_key"));

        let path = endpoints.resolve("users", "get", &[("id", "1")])?;
        validate_status_code(&client.get(&path, RequestOptions::new()).await?, 200)?;
        Ok(())
    }
    .boxed()
}

fn request_with_basic_auth(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, endpoints } = ctx;
        client.set_basic_auth("user", "pass");
        ensure!(client.basic_auth().map(|c| c.username.as_str()) == Some("user"));

        let path = endpoints.resolve("users", "get", &[("id", "1")])?;
        validate_status_code(&client.get(&path, RequestOptions::new()).await?, 200)?;
        Ok(())
    }
    .boxed()
}

fn clear_authentication(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, .. } = ctx;
        client.set_auth_token("test_token", None);
        client.set_basic_auth("user", "pass");
        client.clear_auth();
        ensure!(client.header("Authorization").is_none(), "Authorization header survived clear_auth");
        ensure!(client.basic_auth().is_none(), "basic auth survived clear_auth");
        Ok(())
    }
    .boxed()
}

fn switch_auth_methods(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, .. } = ctx;
        client.set_auth_token("bearer_token", None);
        client.clear_auth();
        client.set_api_key("api_key", None);
        ensure!(client.header("X-API-Key") == Some("api_key"));
        ensure!(client.header("Authorization").is_none());

        // API keys are ordinary headers and outlive clear_auth
        client.clear_auth();
        ensure!(client.header("X-API-Key") == Some("api_key"));
        Ok(())
    }
    .boxed()
}

fn auth_header_override(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, endpoints } = ctx;
        client.set_auth_token("default_token", None);

        let path = endpoints.resolve("users", "get", &[("id", "1")])?;
        let options = RequestOptions::new().header("Authorization", "Bearer custom_token");
        validate_status_code(&client.get(&path, options).await?, 200)?;
        ensure!(client.header("Authorization") == Some("Bearer default_token"));
        Ok(())
    }
    .boxed()
}

fn different_token_types(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let CaseContext { mut client, .. } = ctx;
        for (token_type, token) in [("Bearer", "bearer_token_123"), ("Token", "token_123"), ("JWT", "jwt_token_123")] {
            client.set_auth_token(token, Some(token_type));
            let expected = format!("{} {}", token_type, token);
            ensure!(
                client.header("Authorization") == Some(expected.as_str()),
                "expected Authorization '{}'",
                expected
            );
        }
        Ok(())
    }
    .boxed()
}
