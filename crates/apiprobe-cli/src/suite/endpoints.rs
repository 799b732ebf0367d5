//! CRUD cases for users, posts and comments

use super::{as_array, json_body, CaseContext, Category, TestCase};
use anyhow::{ensure, Result};
use apiprobe_fixtures::{generate_test_data, DataKind};
use apiprobe_http::RequestOptions;
use apiprobe_validators::{
    validate_field_value, validate_json_structure, validate_response_time, validate_status_code,
    AssertionFailure, CustomValidator, ValidationResult,
};
use apiprobe_core::ResponseRecord;
use futures::future::{BoxFuture, FutureExt};
use serde_json::json;
use std::time::Duration;

const MAX_LIST_TIME: Duration = Duration::from_secs(2);

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(Category::Users, "get_users_list", get_users_list),
        TestCase::new(Category::Users, "get_user_by_id", get_user_by_id),
        TestCase::new(Category::Users, "get_nonexistent_user", get_nonexistent_user),
        TestCase::new(Category::Users, "create_user", create_user),
        TestCase::new(Category::Users, "update_user", update_user),
        TestCase::new(Category::Users, "delete_user", delete_user),
        TestCase::new(Category::Posts, "get_posts_list", get_posts_list),
        TestCase::new(Category::Posts, "get_post_by_id", get_post_by_id),
        TestCase::new(Category::Posts, "create_post", create_post),
        TestCase::new(Category::Posts, "get_existing_post_status", get_existing_post_status),
        TestCase::new(Category::Posts, "get_missing_post_status", get_missing_post_status),
        TestCase::new(Category::Comments, "get_comments_for_post", get_comments_for_post),
        TestCase::new(Category::Comments, "get_comments_list", get_comments_list),
    ]
}

fn get_users_list(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("users", "list", &[])?, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;
        validate_response_time(&response, MAX_LIST_TIME)?;

        let users = as_array(json_body(&response)?)?;
        ensure!(!users.is_empty(), "user list is empty");
        validate_json_structure(&users[0], &["id", "name", "email"])?;
        Ok(())
    }
    .boxed()
}

fn get_user_by_id(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;

        let user = json_body(&response)?;
        validate_field_value(user, "id", &json!(1))?;
        validate_json_structure(user, &["name", "email"])?;
        Ok(())
    }
    .boxed()
}

fn get_nonexistent_user(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "get", &[("id", "99999")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_status_code(&response, 404)?;
        Ok(())
    }
    .boxed()
}

fn create_user(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let user = generate_test_data(DataKind::User);
        let payload = json!({"name": user["name"], "email": user["email"]});

        let path = ctx.path("users", "create", &[])?;
        let response = ctx.client.post(&path, RequestOptions::new().json(payload)).await?;
        validate_status_code(&response, 201)?;
        validate_json_structure(json_body(&response)?, &["id"])?;
        Ok(())
    }
    .boxed()
}

fn update_user(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let payload = json!({"name": "Updated Name", "email": "updated@example.com"});
        let path = ctx.path("users", "update", &[("id", "1")])?;
        let response = ctx.client.put(&path, RequestOptions::new().json(payload)).await?;
        validate_status_code(&response, 200)?;
        validate_field_value(json_body(&response)?, "name", &json!("Updated Name"))?;
        Ok(())
    }
    .boxed()
}

fn delete_user(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("users", "delete", &[("id", "1")])?;
        let response = ctx.client.delete(&path, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;
        Ok(())
    }
    .boxed()
}

fn get_posts_list(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("posts", "list", &[])?, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;
        validate_response_time(&response, MAX_LIST_TIME)?;
        ensure!(!as_array(json_body(&response)?)?.is_empty(), "post list is empty");
        Ok(())
    }
    .boxed()
}

fn get_post_by_id(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("posts", "get", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;

        let post = json_body(&response)?;
        validate_field_value(post, "id", &json!(1))?;
        validate_json_structure(post, &["id", "userId", "title", "body"])?;
        Ok(())
    }
    .boxed()
}

fn create_post(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let payload = json!({"title": "Test Post", "body": "This is a test post", "userId": 1});
        let path = ctx.path("posts", "create", &[])?;
        let response = ctx.client.post(&path, RequestOptions::new().json(payload)).await?;
        validate_status_code(&response, 201)?;
        validate_field_value(json_body(&response)?, "title", &json!("Test Post"))?;
        Ok(())
    }
    .boxed()
}

async fn post_status(ctx: CaseContext, post_id: &str, expected: u16) -> Result<()> {
    let path = ctx.path("posts", "get", &[("id", post_id)])?;
    let response = ctx.client.get(&path, RequestOptions::new()).await?;
    validate_status_code(&response, expected)?;
    Ok(())
}

fn get_existing_post_status(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    post_status(ctx, "1", 200).boxed()
}

fn get_missing_post_status(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    post_status(ctx, "9999", 404).boxed()
}

/// Every comment in the body belongs to `post_id`
fn belongs_to_post(post_id: i64) -> impl Fn(&ResponseRecord) -> ValidationResult<()> {
    move |response: &ResponseRecord| {
        let comments = response
            .json()
            .ok()
            .and_then(|body| body.as_array().cloned())
            .unwrap_or_default();
        for comment in &comments {
            if comment["postId"] != json!(post_id) {
                return Err(AssertionFailure::custom(
                    "comment post id",
                    post_id.to_string(),
                    comment["postId"].to_string(),
                )
                .into());
            }
        }
        Ok(())
    }
}

fn get_comments_for_post(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let path = ctx.path("posts", "comments", &[("id", "1")])?;
        let response = ctx.client.get(&path, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;
        as_array(json_body(&response)?)?;
        belongs_to_post(1).validate(&response)?;
        Ok(())
    }
    .boxed()
}

fn get_comments_list(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("comments", "list", &[])?, RequestOptions::new()).await?;
        validate_status_code(&response, 200)?;
        validate_response_time(&response, MAX_LIST_TIME)?;

        let comments = as_array(json_body(&response)?)?;
        ensure!(!comments.is_empty(), "comment list is empty");
        validate_json_structure(&comments[0], &["id", "postId", "name", "email", "body"])?;
        Ok(())
    }
    .boxed()
}
