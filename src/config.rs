//! Runtime options for document decoding and equivalence checks.
//!
//! Limits default to conservative values and can be raised or lowered
//! through environment variables without recompiling:
//!
//! | Variable                     | Default  |
//! |------------------------------|----------|
//! | `CFGCHECK_MAX_DOCUMENT_SIZE` | 10 MiB   |
//! | `CFGCHECK_MAX_DEPTH`         | 128      |

use std::sync::LazyLock;

/// Limits applied while decoding a document.
///
/// A document over either limit fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum document size in bytes.
    pub max_document_size: usize,

    /// Maximum nesting depth of sequences and mappings.
    pub max_depth: usize,
}

/// Environment is read once per process.
static ENV_LIMITS: LazyLock<Limits> = LazyLock::new(Limits::from_env);

impl Limits {
    /// Reads limits from the environment, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_document_size: env_or("CFGCHECK_MAX_DOCUMENT_SIZE", 10 * 1024 * 1024),
            max_depth: env_or("CFGCHECK_MAX_DEPTH", 128),
        }
    }
}

impl Default for Limits {
    /// Returns the process-wide limits resolved on first use.
    fn default() -> Self {
        *ENV_LIMITS
    }
}

/// How numeric scalars compare during structural equivalence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Integers and floats are distinct kinds: `1` and `1.0` differ.
    #[default]
    Strict,
    /// Numbers compare by value: `1` and `1.0` are equal.
    Normalized,
}

/// Options for [`EquivalenceChecker`](crate::structure::EquivalenceChecker).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceOptions {
    /// Numeric comparison policy.
    pub numeric: NumericPolicy,

    /// Decoder limits.
    pub limits: Limits,
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
