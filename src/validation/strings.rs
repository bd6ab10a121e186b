//! Text constraints.

use super::{ValidationOutcome, Validator, unsupported};
use crate::error::Result;
use crate::value::Value;

/// Returns a validator requiring a string whose length, in characters, is
/// within `min..=max`.
///
/// Applying it to a non-string attribute is a misuse fault.
#[must_use]
pub fn string_len_between(min: usize, max: usize) -> impl Validator {
    move |value: &Value, key: &str| -> Result<ValidationOutcome> {
        let Some(s) = value.as_str() else {
            return Err(unsupported("string_len_between", value, key));
        };

        let len = s.chars().count();
        if len < min || len > max {
            return Ok(ValidationOutcome::error(format!(
                "expected length of {key} to be in the range ({min} - {max}), got {s}"
            )));
        }
        Ok(ValidationOutcome::pass())
    }
}

/// Returns a validator requiring a string that is one of `valid`.
///
/// With `ignore_case`, comparison uses Unicode lowercase folding.
/// Applying it to a non-string attribute is a misuse fault.
#[must_use]
pub fn string_in_slice<S: AsRef<str>>(valid: &[S], ignore_case: bool) -> impl Validator + use<S> {
    let valid: Vec<String> = valid.iter().map(|s| s.as_ref().to_string()).collect();

    move |value: &Value, key: &str| -> Result<ValidationOutcome> {
        let Some(s) = value.as_str() else {
            return Err(unsupported("string_in_slice", value, key));
        };

        let matched = valid.iter().any(|candidate| {
            if ignore_case {
                candidate.to_lowercase() == s.to_lowercase()
            } else {
                candidate == s
            }
        });

        if matched {
            Ok(ValidationOutcome::pass())
        } else {
            Ok(ValidationOutcome::error(format!(
                "expected {key} to be one of {valid:?}, got {s}"
            )))
        }
    }
}
