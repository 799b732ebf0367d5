//! Retry decisions, kept free of I/O and timers so they can be tested
//! without a network or a clock.

use crate::error::ClientResult;
use apiprobe_core::{ClientConfig, ResponseRecord};
use std::time::Duration;

/// Classification of a single attempt's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A response arrived with this status code
    Response { status: u16 },
    /// Connectivity, timeout or other transport failure
    TransportFailure,
    /// Error raised before anything was sent (bad URL, bad header, ...)
    Fatal,
}

impl AttemptOutcome {
    pub fn of(result: &ClientResult<ResponseRecord>) -> Self {
        match result {
            Ok(response) => AttemptOutcome::Response {
                status: response.status(),
            },
            Err(e) if e.is_transport() => AttemptOutcome::TransportFailure,
            Err(_) => AttemptOutcome::Fatal,
        }
    }
}

/// Classification of status codes for retry decision making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClassification {
    /// Server errors (>= 500)
    Retryable,
    /// Everything else, 4xx included
    Terminal,
}

/// What the executor should do after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for `delay`, then make another attempt
    Retry { delay: Duration },
    /// Hand the attempt's response to the caller
    Return,
    /// Hand the attempt's error to the caller
    Raise,
}

/// Bounded retry with a fixed delay. No backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `retry_count` is the total number of attempts; zero still allows one
    pub fn new(retry_count: u32, delay: Duration) -> Self {
        Self {
            max_attempts: retry_count.max(1),
            delay,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.retry_count, config.retry_delay)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn classify_status_code(status_code: u16) -> ErrorClassification {
        if status_code >= 500 {
            ErrorClassification::Retryable
        } else {
            ErrorClassification::Terminal
        }
    }

    /// Decide what follows attempt number `attempt` (1-based).
    ///
    /// Exhausted 5xx responses are returned, exhausted transport failures
    /// are raised.
    pub fn decide(&self, outcome: AttemptOutcome, attempt: u32) -> RetryDecision {
        let attempts_left = attempt < self.max_attempts;
        match outcome {
            AttemptOutcome::Response { status } => match Self::classify_status_code(status) {
                ErrorClassification::Terminal => RetryDecision::Return,
                ErrorClassification::Retryable if attempts_left => RetryDecision::Retry { delay: self.delay },
                ErrorClassification::Retryable => RetryDecision::Return,
            },
            AttemptOutcome::TransportFailure if attempts_left => RetryDecision::Retry { delay: self.delay },
            AttemptOutcome::TransportFailure => RetryDecision::Raise,
            AttemptOutcome::Fatal => RetryDecision::Raise,
        }
    }
}
