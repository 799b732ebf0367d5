//! Individual validators and the sequencing [`validate_response`].

use crate::error::{AssertionFailure, CheckKind, ValidationError, ValidationResult};
use crate::expectation::Expectation;
use crate::json_type::JsonType;
use apiprobe_core::ResponseRecord;
use indexmap::IndexMap;
use jsonschema::JSONSchema;
use serde_json::Value as JsonValue;
use std::time::Duration;

fn fail(failure: AssertionFailure) -> ValidationError {
    tracing::error!("{}", failure);
    ValidationError::Assertion(failure)
}

pub fn validate_status_code(response: &ResponseRecord, expected: u16) -> ValidationResult<()> {
    if response.status() != expected {
        return Err(fail(
            AssertionFailure::new(
                CheckKind::StatusCode,
                expected.to_string(),
                response.status().to_string(),
            )
            .with_body(&response.text()),
        ));
    }
    tracing::debug!(status = expected, "Status code validation passed");
    Ok(())
}

/// Compares the elapsed time recorded by the executor against `max`
pub fn validate_response_time(response: &ResponseRecord, max: Duration) -> ValidationResult<()> {
    let elapsed = response.elapsed();
    if elapsed > max {
        return Err(fail(AssertionFailure::new(
            CheckKind::ResponseTime,
            format!("<= {:.3}s", max.as_secs_f64()),
            format!("{:.3}s", elapsed.as_secs_f64()),
        )));
    }
    tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Response time validation passed");
    Ok(())
}

/// Standard JSON Schema validation. Every violation is reported, each
/// prefixed with the JSON pointer of the offending instance.
pub fn validate_json_schema(document: &JsonValue, schema: &JsonValue) -> ValidationResult<()> {
    let compiled = JSONSchema::compile(schema)
        .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;

    let result = compiled.validate(document);
    if let Err(errors) = result {
        let errors: Vec<String> = errors
            .map(|e| {
                let path = e.instance_path.to_string();
                let path = if path.is_empty() { "(root)".to_string() } else { path };
                format!("{}: {}", path, e)
            })
            .collect();
        tracing::error!(count = errors.len(), "JSON schema validation failed");
        return Err(ValidationError::SchemaViolation { errors });
    }
    tracing::debug!("JSON schema validation passed");
    Ok(())
}

/// Fails listing every key of `required_keys` absent from the top level
pub fn validate_json_structure<S: AsRef<str>>(
    document: &JsonValue,
    required_keys: &[S],
) -> ValidationResult<()> {
    let missing: Vec<String> = required_keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| document.get(*key).is_none())
        .map(str::to_string)
        .collect();

    if !missing.is_empty() {
        let expected: Vec<&str> = required_keys.iter().map(AsRef::as_ref).collect();
        let present: Vec<&str> = document
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        return Err(fail(AssertionFailure::new(
            CheckKind::JsonStructure { missing },
            format!("{:?}", expected),
            format!("{:?}", present),
        )));
    }
    tracing::debug!("JSON structure validation passed");
    Ok(())
}

fn field<'a>(document: &'a JsonValue, name: &str, check: CheckKind) -> ValidationResult<&'a JsonValue> {
    document
        .get(name)
        .ok_or_else(|| fail(AssertionFailure::new(check, format!("field '{}'", name), "missing")))
}

pub fn validate_field_type(
    document: &JsonValue,
    field_name: &str,
    expected: JsonType,
) -> ValidationResult<()> {
    let check = CheckKind::FieldType {
        field: field_name.to_string(),
    };
    let value = field(document, field_name, check.clone())?;
    if !expected.matches(value) {
        return Err(fail(AssertionFailure::new(
            check,
            expected.as_str(),
            JsonType::of(value).as_str(),
        )));
    }
    Ok(())
}

/// Structural equality, so nested arrays and objects compare by content
pub fn validate_field_value(
    document: &JsonValue,
    field_name: &str,
    expected: &JsonValue,
) -> ValidationResult<()> {
    let check = CheckKind::FieldValue {
        field: field_name.to_string(),
    };
    let value = field(document, field_name, check.clone())?;
    if value != expected {
        return Err(fail(AssertionFailure::new(
            check,
            expected.to_string(),
            value.to_string(),
        )));
    }
    Ok(())
}

/// Header names are matched case-insensitively, values exactly
pub fn validate_headers(
    response: &ResponseRecord,
    expected: &IndexMap<String, String>,
) -> ValidationResult<()> {
    for (name, value) in expected {
        let actual = response.header(name);
        if actual != Some(value.as_str()) {
            return Err(fail(AssertionFailure::new(
                CheckKind::Header { name: name.clone() },
                value.clone(),
                actual.unwrap_or("<missing>"),
            )));
        }
    }
    tracing::debug!("Headers validation passed");
    Ok(())
}

/// Run every check `expectation` asks for, stopping at the first failure.
///
/// Order: status, response time, JSON decode and schema, required keys,
/// field types, field values, headers. A body that is not JSON fails as a
/// [`CheckKind::JsonDecode`] assertion when any JSON check is requested.
pub fn validate_response(response: &ResponseRecord, expectation: &Expectation) -> ValidationResult<()> {
    if let Some(status) = expectation.status {
        validate_status_code(response, status)?;
    }
    if let Some(max) = expectation.max_response_time {
        validate_response_time(response, max)?;
    }

    if expectation.needs_json() {
        let document = response.json().map_err(|e| {
            fail(
                AssertionFailure::new(CheckKind::JsonDecode, "valid JSON body", e.to_string())
                    .with_body(&response.text()),
            )
        })?;

        if let Some(schema) = &expectation.schema {
            validate_json_schema(document, schema)?;
        }
        if !expectation.required_keys.is_empty() {
            validate_json_structure(document, expectation.required_keys.as_slice())?;
        }
        for (name, expected) in &expectation.field_types {
            validate_field_type(document, name, *expected)?;
        }
        for (name, expected) in &expectation.field_values {
            validate_field_value(document, name, expected)?;
        }
    }

    validate_headers(response, &expectation.headers)?;
    tracing::info!("Response validation passed");
    Ok(())
}
