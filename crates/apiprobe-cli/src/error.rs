//! Error types for the CLI

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] apiprobe_core::CoreError),

    #[error("Request failed: {0}")]
    Client(#[from] apiprobe_http::ClientError),

    #[error("{0}")]
    Validation(#[from] apiprobe_validators::ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{failed} of {total} test cases failed")]
    SuiteFailed { failed: usize, total: usize },

    #[error("General error: {0}")]
    General(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::General(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
