//! Composable assertions over completed HTTP exchanges.
//!
//! Every validator is a pure function returning `Ok(())` on success and a
//! [`ValidationError`] describing the mismatch otherwise. None of them
//! perform I/O or mutate their inputs.

pub mod custom;
pub mod error;
pub mod expectation;
pub mod json_type;
pub mod validators;

pub use custom::CustomValidator;
pub use error::{AssertionFailure, CheckKind, ValidationError, ValidationResult};
pub use expectation::Expectation;
pub use json_type::JsonType;
pub use validators::{
    validate_field_type, validate_field_value, validate_headers, validate_json_schema,
    validate_json_structure, validate_response, validate_response_time, validate_status_code,
};
