//! Polling and retry helpers for test bodies

use crate::error::{HelperError, HelperResult};
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

/// Poll `condition` every `interval` until it returns true or `timeout`
/// elapses.
pub async fn wait_for_condition<F, Fut>(
    mut condition: F,
    timeout: Duration,
    interval: Duration,
    error_message: Option<&str>,
) -> HelperResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    while start.elapsed() < timeout {
        if condition().await {
            tracing::info!("Condition met");
            return Ok(());
        }
        tokio::time::sleep(interval).await;
    }

    let message = error_message.unwrap_or("Condition not met within timeout");
    tracing::error!("Timeout: {}", message);
    Err(HelperError::Timeout(message.to_string()))
}

/// Run `operation` up to `max_attempts` times with a fixed `delay`,
/// returning the first success or the last error.
pub async fn retry_on_failure<F, Fut, T, E>(
    mut operation: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => {
                tracing::info!("Function succeeded on attempt {}", attempt);
                return Ok(value);
            }
            Err(e) if attempt < max_attempts => {
                tracing::warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("All {} attempts failed", max_attempts);
                return Err(e);
            }
        }
    }
}

pub fn measure_execution_time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    tracing::info!("Execution time: {:.3}s", elapsed.as_secs_f64());
    (result, elapsed)
}
