//! Retrying HTTP request executor.
//!
//! [`ApiClient`] owns a connection session, default headers and
//! authentication state. Each call to [`ApiClient::execute`] turns one
//! logical request into exactly one successful or exhausted exchange:
//! transport failures and 5xx responses are retried with a fixed delay,
//! everything below 500 is returned immediately.
//!
//! An `ApiClient` is meant to be driven from one task at a time. Auth setters
//! take `&mut self`, so the borrow checker already prevents them from racing
//! with in-flight requests on the same instance; independent test cases
//! should each own their own client.

pub mod client_cache;
pub mod error;
pub mod executor;
pub mod method;
pub mod options;
pub mod retry_manager;
pub mod session;
pub mod sleeper;
pub mod timeout_manager;
pub mod url_builder;

// Re-export commonly used types
pub use error::{ClientError, ClientResult};
pub use executor::ApiClient;
pub use method::HttpMethod;
pub use options::{RequestBody, RequestOptions};
pub use retry_manager::{AttemptOutcome, RetryDecision, RetryPolicy};
pub use session::{BasicCredentials, Session};
pub use sleeper::{Sleeper, TokioSleeper};
pub use url_builder::UrlBuilder;

pub use apiprobe_core::{ClientConfig, ResponseRecord};
