//! Shared data model for apiprobe.
//!
//! Holds the immutable client configuration, the environment-driven
//! [`Settings`], the static [`EndpointTable`] and the [`ResponseRecord`]
//! produced by the request executor and consumed by the validators.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod response;

// Re-export commonly used types
pub use config::{ClientConfig, Settings};
pub use endpoints::EndpointTable;
pub use error::{CoreError, CoreResult};
pub use response::ResponseRecord;
