use crate::error::ValidationResult;
use apiprobe_core::ResponseRecord;

/// Caller-defined response check.
///
/// Closures of the right shape implement this directly:
///
/// ```
/// use apiprobe_validators::{AssertionFailure, CustomValidator, ValidationResult};
/// use apiprobe_core::ResponseRecord;
///
/// let non_empty = |response: &ResponseRecord| -> ValidationResult<()> {
///     if response.body().is_empty() {
///         return Err(AssertionFailure::custom("non-empty body", "content", "nothing").into());
///     }
///     Ok(())
/// };
/// # let _ = non_empty.name();
/// ```
pub trait CustomValidator {
    fn name(&self) -> &str {
        "custom"
    }

    fn validate(&self, response: &ResponseRecord) -> ValidationResult<()>;
}

impl<F> CustomValidator for F
where
    F: Fn(&ResponseRecord) -> ValidationResult<()>,
{
    fn validate(&self, response: &ResponseRecord) -> ValidationResult<()> {
        self(response)
    }
}
