#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },
}

pub type HelperResult<T> = Result<T, HelperError>;
