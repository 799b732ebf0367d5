use serde::Serialize;
use std::fmt;

/// Longest body excerpt carried by a failure
pub const BODY_SNIPPET_LIMIT: usize = 200;

/// Which check produced an [`AssertionFailure`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckKind {
    StatusCode,
    ResponseTime,
    JsonDecode,
    JsonStructure { missing: Vec<String> },
    FieldType { field: String },
    FieldValue { field: String },
    Header { name: String },
    Custom { name: String },
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::StatusCode => write!(f, "status code"),
            CheckKind::ResponseTime => write!(f, "response time"),
            CheckKind::JsonDecode => write!(f, "JSON decode"),
            CheckKind::JsonStructure { missing } => {
                write!(f, "JSON structure (missing keys: {})", missing.join(", "))
            }
            CheckKind::FieldType { field } => write!(f, "type of field '{}'", field),
            CheckKind::FieldValue { field } => write!(f, "value of field '{}'", field),
            CheckKind::Header { name } => write!(f, "header '{}'", name),
            CheckKind::Custom { name } => write!(f, "{}", name),
        }
    }
}

/// A mismatch between what a check expected and what the response held
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    pub check: CheckKind,
    pub expected: String,
    pub actual: String,
    pub body_snippet: Option<String>,
}

impl AssertionFailure {
    pub fn new(check: CheckKind, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            check,
            expected: expected.into(),
            actual: actual.into(),
            body_snippet: None,
        }
    }

    /// Failure raised by a caller-defined check
    pub fn custom(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(CheckKind::Custom { name: name.into() }, expected, actual)
    }

    /// Attach at most [`BODY_SNIPPET_LIMIT`] characters of the body
    pub fn with_body(mut self, body: &str) -> Self {
        self.body_snippet = Some(body.chars().take(BODY_SNIPPET_LIMIT).collect());
        self
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mismatch: expected {}, got {}",
            self.check, self.expected, self.actual
        )?;
        if let Some(snippet) = &self.body_snippet {
            write!(f, ". Response: {}", snippet)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Assertion failed: {0}")]
    Assertion(AssertionFailure),

    #[error("Schema violation: {}", .errors.join("; "))]
    SchemaViolation { errors: Vec<String> },

    #[error("Invalid JSON schema: {0}")]
    InvalidSchema(String),
}

impl ValidationError {
    /// The assertion failure, if this is one
    pub fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            ValidationError::Assertion(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<AssertionFailure> for ValidationError {
    fn from(failure: AssertionFailure) -> Self {
        ValidationError::Assertion(failure)
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_snippet_is_truncated() {
        let body = "x".repeat(500);
        let failure = AssertionFailure::new(CheckKind::StatusCode, "200", "500").with_body(&body);
        assert_eq!(failure.body_snippet.as_ref().map(|s| s.chars().count()), Some(200));
    }

    #[test]
    fn test_display_lists_missing_keys() {
        let failure = AssertionFailure::new(
            CheckKind::JsonStructure {
                missing: vec!["email".into(), "phone".into()],
            },
            "[\"id\", \"email\", \"phone\"]",
            "[\"id\"]",
        );
        let message = ValidationError::from(failure).to_string();
        assert!(message.contains("missing keys: email, phone"));
    }

    #[test]
    fn test_schema_violation_message() {
        let err = ValidationError::SchemaViolation {
            errors: vec!["/id: \"1\" is not of type \"integer\"".into()],
        };
        assert!(err.to_string().starts_with("Schema violation: /id"));
        assert!(err.as_assertion().is_none());
    }
}
