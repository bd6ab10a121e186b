//! Error types for `cfgcheck`
//!
//! Two families live here and must never be confused:
//!
//! - [`ConstraintViolation`]: an expected, user-facing failure of a value
//!   against a constraint. These are *data*, collected into a
//!   [`ValidationOutcome`](crate::validation::ValidationOutcome).
//! - [`CheckError`]: faults that abort an operation. Misuse variants signal a
//!   bug in the schema definition or in how the toolkit was wired, and are
//!   never folded into ordinary validation output.

use thiserror::Error;

use crate::value::ValueKind;

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `cfgcheck` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A constraint was applied to a value kind it does not support.
    ///
    /// This is a schema authoring bug, not bad user input.
    #[error("can't use {validator} with {kind} attribute {key}")]
    UnsupportedValueKind {
        /// Name of the misapplied validator
        validator: &'static str,
        /// Kind of the value the validator received
        kind: ValueKind,
        /// Attribute key the validator was evaluated for
        key: String,
    },

    /// The diagnostic adapter was wired to a location that does not end in a
    /// named attribute.
    #[error("invalid attribute path '{path}': {reason}")]
    PathPrecondition {
        /// Rendered attribute path
        path: String,
        /// Why the path was rejected
        reason: &'static str,
    },

    /// A document could not be decoded into a structural value.
    #[error("{format} decode error: {message}")]
    Decode {
        /// Document format (e.g. `"json"`)
        format: &'static str,
        /// Error message from the decoder
        message: String,
    },

    /// A document exceeded a configured limit.
    #[error("limit exceeded: {what} is {actual} (limit: {limit})")]
    LimitExceeded {
        /// Which limit was hit
        what: &'static str,
        /// Observed size or depth
        actual: usize,
        /// Configured maximum
        limit: usize,
    },
}

impl CheckError {
    /// Returns `true` for faults caused by wiring the toolkit incorrectly.
    ///
    /// Misuse faults must surface loudly during development; document
    /// faults are expected at runtime.
    #[must_use]
    pub const fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedValueKind { .. } | Self::PathPrecondition { .. }
        )
    }

    pub(crate) fn json(err: &serde_json::Error) -> Self {
        Self::Decode {
            format: "json",
            message: err.to_string(),
        }
    }

    pub(crate) fn yaml(err: &serde_yaml::Error) -> Self {
        Self::Decode {
            format: "yaml",
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Constraint Violations
// ============================================================================

/// A value failed a constraint.
///
/// The message is what ends up in a diagnostic summary, so it should read
/// well on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    message: String,
}

impl ConstraintViolation {
    /// Creates a violation with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `cfgcheck` operations.
pub type Result<T> = std::result::Result<T, CheckError>;

// ============================================================================
// Tests
// ============================================================================
