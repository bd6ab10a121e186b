//! Composable single-value validators.
//!
//! A [`Validator`] judges one attribute value against one constraint and
//! returns a [`ValidationOutcome`] of warnings and errors. Constraint
//! violations are data; the `Err` side of the returned `Result` is reserved
//! for misuse faults (see [`CheckError::is_misuse`]).
//!
//! Validators compose through [`all`] and [`any`], and are turned into
//! positioned diagnostics with [`to_diag_fn`].

pub mod ints;
pub mod meta;
pub mod strings;

use std::sync::Arc;

use tracing::error;

use crate::error::{CheckError, ConstraintViolation, Result};
use crate::value::Value;

pub use ints::int_between;
pub use meta::{All, Any, DiagValidator, all, any, no_zero_values, to_diag_fn};
pub use strings::{string_in_slice, string_len_between};

// ============================================================================
// Validator
// ============================================================================

/// A constraint on a single attribute value.
///
/// Implementations must be pure: same input, same outcome, no side effects.
/// Any `Fn(&Value, &str) -> Result<ValidationOutcome>` is a validator.
pub trait Validator: Send + Sync {
    /// Validates `value`, the value of attribute `key`.
    ///
    /// # Errors
    ///
    /// Returns a misuse fault if the validator cannot be applied to the
    /// value at all. Ordinary failures go in the returned outcome.
    fn validate(&self, value: &Value, key: &str) -> Result<ValidationOutcome>;
}

impl<F> Validator for F
where
    F: Fn(&Value, &str) -> Result<ValidationOutcome> + Send + Sync,
{
    fn validate(&self, value: &Value, key: &str) -> Result<ValidationOutcome> {
        self(value, key)
    }
}

/// A validator that can be stored in a combinator.
pub type SharedValidator = Arc<dyn Validator>;

/// Wraps a validator for use with [`all`] and [`any`].
pub fn shared<V: Validator + 'static>(validator: V) -> SharedValidator {
    Arc::new(validator)
}

// ============================================================================
// Outcome
// ============================================================================

/// Warnings and errors produced by one validation.
///
/// Order is significant: it is the order users see the messages in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Warnings (informational)
    pub warnings: Vec<String>,

    /// Constraint violations
    pub errors: Vec<ConstraintViolation>,
}

impl ValidationOutcome {
    /// An outcome with no warnings and no errors.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// An outcome with a single error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            warnings: Vec::new(),
            errors: vec![ConstraintViolation::new(message)],
        }
    }

    /// An outcome with a single warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            warnings: vec![message.into()],
            errors: Vec::new(),
        }
    }

    /// Returns `true` if there are no warnings and no errors.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Appends another outcome's warnings and errors, keeping order.
    pub fn extend(&mut self, other: Self) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }
}

/// Builds (and logs) the fault for a validator applied to the wrong kind.
pub(crate) fn unsupported(validator: &'static str, value: &Value, key: &str) -> CheckError {
    let kind = value.kind();
    error!(
        validator,
        %kind,
        key,
        "validator applied to unsupported value kind"
    );
    CheckError::UnsupportedValueKind {
        validator,
        kind,
        key: key.to_string(),
    }
}
