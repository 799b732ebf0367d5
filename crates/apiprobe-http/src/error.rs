use apiprobe_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Client session is closed")]
    Closed,
}

impl ClientError {
    /// Whether this error came from the transport (connectivity, timeout,
    /// send/receive failure) rather than from building the request.
    pub fn is_transport(&self) -> bool {
        match self {
            ClientError::Timeout(_) | ClientError::Connection(_) => true,
            ClientError::Http(e) => !e.is_builder(),
            _ => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Timeout("slow".into()).is_transport());
        assert!(ClientError::Connection("refused".into()).is_transport());
        assert!(!ClientError::InvalidConfig("bad".into()).is_transport());
        assert!(!ClientError::InvalidMethod("TRACE".into()).is_transport());
        assert!(!ClientError::Closed.is_transport());
    }
}
