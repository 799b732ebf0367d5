use super::{CaseContext, Category, TestCase};
use anyhow::{ensure, Result};
use apiprobe_http::RequestOptions;
use futures::future::{BoxFuture, FutureExt};

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(Category::Smoke, "api_is_reachable", api_is_reachable),
        TestCase::new(Category::Smoke, "response_format_is_json", response_format_is_json),
    ]
}

fn api_is_reachable(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("users", "list", &[])?, RequestOptions::new()).await?;
        ensure!(
            response.status() < 500,
            "API answered with server error {}",
            response.status()
        );
        Ok(())
    }
    .boxed()
}

fn response_format_is_json(ctx: CaseContext) -> BoxFuture<'static, Result<()>> {
    async move {
        let response = ctx.client.get(&ctx.path("users", "list", &[])?, RequestOptions::new()).await?;
        let content_type = response.header("Content-Type").unwrap_or_default();
        ensure!(
            content_type.contains("application/json"),
            "unexpected Content-Type '{}'",
            content_type
        );
        Ok(())
    }
    .boxed()
}
