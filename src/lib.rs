//! `cfgcheck` - configuration validation and schema compatibility toolkit
//!
//! Building blocks for a declarative configuration engine:
//!
//! - [`validation`]: composable single-value validators ([`all`], [`any`],
//!   [`no_zero_values`], ...) and the [`to_diag_fn`] adapter that turns their
//!   output into positioned [`Diagnostic`]s.
//! - [`structure`]: structural equivalence of serialized documents, used to
//!   suppress diffs that are only formatting noise.
//! - [`schema`]: structural schema descriptions and the
//!   [`SchemaVersionPair`] that decides whether stored state needs an
//!   upgrade.
//!
//! Everything here is pure and synchronous; all public types are
//! `Send + Sync`.

pub mod config;
pub mod diag;
pub mod error;
pub mod schema;
pub mod structure;
pub mod validation;
pub mod value;

pub use config::{EquivalenceOptions, Limits, NumericPolicy};
pub use diag::{AttributePath, Diagnostic, Diagnostics, DiagnosticsExt, PathStep, Severity};
pub use error::{CheckError, ConstraintViolation, Result};
pub use schema::{Block, SchemaVersionPair};
pub use structure::{EquivalenceChecker, StructuralValue, equivalent, suppress_json_diff};
pub use validation::{
    SharedValidator, ValidationOutcome, Validator, all, any, no_zero_values, shared, to_diag_fn,
};
pub use value::{Value, ValueKind};
