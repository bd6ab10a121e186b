//! Combinators and the diagnostic adapter.

use std::fmt;

use tracing::{debug, error};

use super::{SharedValidator, ValidationOutcome, Validator, unsupported};
use crate::diag::{AttributePath, Diagnostic, Diagnostics, PathStep};
use crate::error::{CheckError, Result};
use crate::value::Value;

// ============================================================================
// Elementary Validators
// ============================================================================

/// Rejects the zero value of text and numeric attributes.
///
/// Useful for catching explicit empty strings or zeros on fields that are
/// otherwise required. Never produces warnings.
///
/// # Errors
///
/// Returns [`CheckError::UnsupportedValueKind`] when a boolean attribute
/// holds its zero value (`false`). Non-zero values of any kind pass.
pub fn no_zero_values(value: &Value, key: &str) -> Result<ValidationOutcome> {
    if !value.is_zero() {
        return Ok(ValidationOutcome::pass());
    }

    match value {
        Value::String(_) => Ok(ValidationOutcome::error(format!(
            "{key} must not be empty, got {value}"
        ))),
        Value::Int(_) | Value::Float(_) => Ok(ValidationOutcome::error(format!(
            "{key} must not be zero, got {value}"
        ))),
        Value::Bool(_) => Err(unsupported("no_zero_values", value, key)),
    }
}

// ============================================================================
// All
// ============================================================================

/// Passes only if every wrapped validator passes. See [`all`].
pub struct All {
    validators: Vec<SharedValidator>,
}

/// Returns a validator that runs every validator and concatenates their
/// warnings and errors in order.
///
/// Every validator runs even after an earlier one fails, so the caller sees
/// all violated constraints at once. With no validators it always passes.
pub fn all<I>(validators: I) -> All
where
    I: IntoIterator<Item = SharedValidator>,
{
    All {
        validators: validators.into_iter().collect(),
    }
}

impl Validator for All {
    fn validate(&self, value: &Value, key: &str) -> Result<ValidationOutcome> {
        if self.validators.is_empty() {
            return Ok(ValidationOutcome::pass());
        }

        let mut outcome = ValidationOutcome::pass();
        for validator in &self.validators {
            outcome.extend(validator.validate(value, key)?);
        }
        Ok(outcome)
    }
}

// dyn Validator is not Debug.
impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field("validators", &self.validators.len())
            .finish()
    }
}

// ============================================================================
// Any
// ============================================================================

/// Passes if at least one wrapped validator passes. See [`any`].
pub struct Any {
    validators: Vec<SharedValidator>,
}

/// Returns a validator that passes as soon as one validator produces no
/// warnings and no errors.
///
/// If every validator fails, the result carries the warnings and errors of
/// all of them, in order. With no validators it always passes.
pub fn any<I>(validators: I) -> Any
where
    I: IntoIterator<Item = SharedValidator>,
{
    Any {
        validators: validators.into_iter().collect(),
    }
}

impl Validator for Any {
    fn validate(&self, value: &Value, key: &str) -> Result<ValidationOutcome> {
        if self.validators.is_empty() {
            return Ok(ValidationOutcome::pass());
        }

        let mut outcome = ValidationOutcome::pass();
        for (idx, validator) in self.validators.iter().enumerate() {
            let attempt = validator.validate(value, key)?;
            if attempt.is_pass() {
                debug!(key, branch = idx, "any: branch passed");
                return Ok(ValidationOutcome::pass());
            }
            outcome.extend(attempt);
        }
        Ok(outcome)
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("validators", &self.validators.len())
            .finish()
    }
}

// ============================================================================
// Diagnostic Adapter
// ============================================================================

/// A validator evaluated at an attribute path. See [`to_diag_fn`].
#[derive(Debug, Clone)]
pub struct DiagValidator<V> {
    validator: V,
}

/// Adapts a validator to produce positioned [`Diagnostic`]s.
///
/// The adapter is only meaningful for scalar attributes: the path it is
/// evaluated at must end in a named attribute, whose name becomes the
/// validator's `key`.
pub const fn to_diag_fn<V: Validator>(validator: V) -> DiagValidator<V> {
    DiagValidator { validator }
}

impl<V: Validator> DiagValidator<V> {
    /// Validates `value` located at `path`.
    ///
    /// Emits all warnings first, then all errors, each in the wrapped
    /// validator's order, all carrying `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::PathPrecondition`] if `path` does not end in a
    /// [`PathStep::Attribute`], and propagates misuse faults from the
    /// wrapped validator.
    pub fn validate(&self, value: &Value, path: &AttributePath) -> Result<Diagnostics> {
        let name = terminal_attribute(path)?;
        let ValidationOutcome { warnings, errors } = self.validator.validate(value, name)?;

        let mut diags = Vec::with_capacity(warnings.len() + errors.len());
        diags.extend(
            warnings
                .into_iter()
                .map(|w| Diagnostic::warning(w, path.clone())),
        );
        diags.extend(
            errors
                .into_iter()
                .map(|e| Diagnostic::error(e.to_string(), path.clone())),
        );
        Ok(diags)
    }

    /// Returns the wrapped validator.
    pub const fn inner(&self) -> &V {
        &self.validator
    }
}

/// Extracts the attribute name a scalar constraint is evaluated for.
fn terminal_attribute(path: &AttributePath) -> Result<&str> {
    let reason = match path.last() {
        Some(PathStep::Attribute(name)) => return Ok(name.as_str()),
        Some(_) => "last step is not an attribute name",
        None => "path is empty",
    };
    error!(%path, reason, "diagnostic adapter wired to a non-attribute location");
    Err(CheckError::PathPrecondition {
        path: path.to_string(),
        reason,
    })
}
