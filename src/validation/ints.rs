//! Integer constraints.

use super::{ValidationOutcome, Validator, unsupported};
use crate::error::Result;
use crate::value::Value;

/// Returns a validator requiring an integer within `min..=max`.
///
/// Applying it to a non-integer attribute is a misuse fault.
#[must_use]
pub fn int_between(min: i64, max: i64) -> impl Validator {
    move |value: &Value, key: &str| -> Result<ValidationOutcome> {
        let Some(i) = value.as_int() else {
            return Err(unsupported("int_between", value, key));
        };

        if (min..=max).contains(&i) {
            Ok(ValidationOutcome::pass())
        } else {
            Ok(ValidationOutcome::error(format!(
                "expected {key} to be in the range ({min} - {max}), got {i}"
            )))
        }
    }
}
