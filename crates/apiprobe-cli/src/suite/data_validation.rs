//! Structure, type, value, header and error-body checks

use super::{as_array, json_body, CaseContext, Category, TestCase};
use anyhow::{ensure, Context, Result};
use apiprobe_http::RequestOptions;
use apiprobe_validators::{
    validate_field_type, validate_field_value, validate_headers, validate_json_structure,
    validate_response, Expectation, JsonType,
};
use futures::future::{BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde_json::json;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(Category::DataValidation, "user_structure", user_structure),
        TestCase::new(Category::DataValidation, "post_structure", post_structure),
        TestCase::new(Category::DataValidation, "comment_structure", comment_structure),
        TestCase::new(Category::DataValidation, "user_schema", user_schema),
        TestCase::new(Category::DataValidation, "user_field_types", user_field_types),
        TestCase::new(Category::DataValidation, "post_field_types", post_field_types),
        TestCase::new(Category::DataValidation, "array_response_type", array_response_type),
        TestCase::new(Category::DataValidation, "post_user_id", post_user_id),
        TestCase::new(Category::DataValidation, "multiple_user_ids", multiple_user_ids),
        TestCase::new(Category::DataValidation, "content_type_header", content_type_header),
        TestCase::new(Category::DataValidation, "email_format", email_format),
        TestCase::new(Category::DataValidation, "positive_ids", positive_ids),
        TestCase::new(Category::DataValidation, "nested_data_integrity", nested_data_integrity),
        TestCase::new(Category::DataValidation, "not_found_body_is_empty", not_found_body_is_empty),
        TestCase::new(Category::DataValidation, "invalid_endpoint", invalid_endpoint),
    ]
}

fn user_structure(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        let user = json_body(&response)?;
        validate_json_structure(user, &["id", "name", "username", "email", "address", "phone"])?;
        validate_json_structure(&user["address"], &["street", "suite", "city", "zipcode", "geo"])?;
        Ok(())
    }
    .boxed()
}

fn post_structure(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("posts", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_json_structure(json_body(&response)?, &["userId", "id", "title", "body"])?;
        Ok(())
    }
    .boxed()
}

fn comment_structure(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("comments", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_json_structure(json_body(&response)?, &["postId", "id", "name", "email", "body"])?;
        Ok(())
    }
    .boxed()
}

fn user_schema(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        let expectation = Expectation::new().status(200).schema(json!({
            "type": "object",
            "required": ["id", "name", "email", "address"],
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"},
                "email": {"type": "string"},
                "address": {
                    "type": "object",
                    "required": ["geo"],
                    "properties": {
                        "geo": {
                            "type": "object",
                            "properties": {
                                "lat": {"type": "string"},
                                "lng": {"type": "string"}
                            }
                        }
                    }
                }
            }
        }));
        validate_response(&response, &expectation)?;
        Ok(())
    }
    .boxed()
}

fn user_field_types(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        let user = json_body(&response)?;
        validate_field_type(user, "id", JsonType::Integer)?;
        validate_field_type(user, "name", JsonType::String)?;
        validate_field_type(user, "email", JsonType::String)?;
        validate_field_type(user, "address", JsonType::Object)?;
        Ok(())
    }
    .boxed()
}

fn post_field_types(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("posts", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        let expectation = Expectation::new()
            .field_type("id", JsonType::Integer)
            .field_type("userId", JsonType::Integer)
            .field_type("title", JsonType::String)
            .field_type("body", JsonType::String);
        validate_response(&response, &expectation)?;
        Ok(())
    }
    .boxed()
}

fn array_response_type(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("users", "list", &[])?, RequestOptions::new()).await?;
        let users = as_array(json_body(&response)?)?;
        ensure!(!users.is_empty(), "user list is empty");
        ensure!(users[0].is_object(), "first user is not an object");
        Ok(())
    }
    .boxed()
}

fn post_user_id(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("posts", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_field_value(json_body(&response)?, "userId", &json!(1))?;
        Ok(())
    }
    .boxed()
}

fn multiple_user_ids(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        for user_id in 1..=5 {
            let id = user_id.to_string();
            let path = ctx.path("users", "get", &[("id", id.as_str())])?;
            let response = ctx.client.get(&path, RequestOptions::new()).await?;
            validate_field_value(json_body(&response)?, "id", &json!(user_id))?;
        }
        Ok(())
    }
    .boxed()
}

fn content_type_header(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("users", "list", &[])?, RequestOptions::new()).await?;
        let mut expected = IndexMap::new();
        expected.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        validate_headers(&response, &expected)?;
        Ok(())
    }
    .boxed()
}

fn email_format(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        let email = json_body(&response)?["email"]
            .as_str()
            .context("email is not a string")?;
        let (_, domain) = email
            .split_once('@')
            .with_context(|| format!("'{}' has no @", email))?;
        ensure!(domain.contains('.'), "'{}' has no domain suffix", email);
        Ok(())
    }
    .boxed()
}

fn positive_ids(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("users", "list", &[])?, RequestOptions::new()).await?;
        for user in as_array(json_body(&response)?)? {
            let id = user["id"].as_i64().unwrap_or_default();
            ensure!(id > 0, "user id {} is not positive", user["id"]);
        }
        Ok(())
    }
    .boxed()
}

fn nested_data_integrity(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        let geo = &json_body(&response)?["address"]["geo"];
        validate_field_type(geo, "lat", JsonType::String)?;
        validate_field_type(geo, "lng", JsonType::String)?;
        Ok(())
    }
    .boxed()
}

fn not_found_body_is_empty(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "99999")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        ensure!(response.status() == 404, "expected 404, got {}", response.status());
        ensure!(json_body(&response)? == &json!({}), "404 body is not an empty object");
        Ok(())
    }
    .boxed()
}

fn invalid_endpoint(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get("/invalid-endpoint", RequestOptions::new()).await?;
        ensure!(response.status() == 404, "expected 404, got {}", response.status());
        Ok(())
    }
    .boxed()
}
