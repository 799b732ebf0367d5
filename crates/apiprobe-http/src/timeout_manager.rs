//! Per-attempt timeout handling

use crate::error::{ClientError, ClientResult};
use reqwest::ClientBuilder;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on establishing a connection, applied to every cached client
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds a single attempt. The timeout covers sending the request and
/// reading the whole response body; retries each get a fresh budget.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutManager {
    timeout: Duration,
}

impl TimeoutManager {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connection-level timeout only; the request timeout stays per attempt
    pub fn apply_to_client_builder(builder: ClientBuilder) -> ClientBuilder {
        builder.connect_timeout(CONNECT_TIMEOUT)
    }

    /// Run one attempt, mapping reqwest failures onto transport errors
    pub async fn execute_with_timeout<F, T>(&self, operation: F) -> ClientResult<T>
    where
        F: Future<Output = Result<T, reqwest::Error>>,
    {
        match timeout(self.timeout, operation).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(self.map_error(e)),
            Err(_) => Err(ClientError::Timeout(format!(
                "Request timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }

    fn map_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(format!(
                "Request timed out after {}ms: {}",
                self.timeout.as_millis(),
                error
            ))
        } else if error.is_connect() {
            ClientError::Connection(format!("Connection failed: {}", error))
        } else {
            ClientError::Http(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_operation_within_timeout() {
        let manager = TimeoutManager::new(Duration::from_millis(200));
        let result = manager
            .execute_with_timeout(async {
                sleep(Duration::from_millis(10)).await;
                Ok::<_, reqwest::Error>("done")
            })
            .await;
        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_slow_operation_times_out() {
        let manager = TimeoutManager::new(Duration::from_millis(50));
        let result = manager
            .execute_with_timeout(async {
                sleep(Duration::from_millis(300)).await;
                Ok::<_, reqwest::Error>("too slow")
            })
            .await;
        match result {
            Err(ClientError::Timeout(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
