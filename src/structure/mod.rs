//! Structural equivalence of serialized documents.
//!
//! Re-serializing unchanged configuration often produces different text
//! (whitespace, key order). The diff engine asks this module whether two
//! documents are the same *structure* so it can suppress those spurious
//! changes.
//!
//! Decode failures never suppress a diff: a document that does not parse is
//! not equivalent to anything, itself included.

pub mod decode;
pub mod value;

use tracing::{debug, trace};

use crate::config::{EquivalenceOptions, NumericPolicy};
use crate::error::{CheckError, Result};

pub use decode::{Decoder, JsonDecoder, YamlDecoder};
pub use value::{Scalar, StructuralValue};

/// Compares documents after decoding them.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceChecker<D = JsonDecoder> {
    decoder: D,
    numeric: NumericPolicy,
}

impl EquivalenceChecker<JsonDecoder> {
    /// Creates a JSON checker from options.
    #[must_use]
    pub fn new(options: &EquivalenceOptions) -> Self {
        Self {
            decoder: JsonDecoder::new(options.limits),
            numeric: options.numeric,
        }
    }
}

impl<D: Decoder> EquivalenceChecker<D> {
    /// Creates a checker with a custom decoder.
    pub const fn with_decoder(decoder: D, numeric: NumericPolicy) -> Self {
        Self { decoder, numeric }
    }

    /// Returns `true` if `a` and `b` decode to equivalent structures.
    ///
    /// Returns `false` if either document fails to decode.
    pub fn equivalent(&self, a: &str, b: &str) -> bool {
        let Some(left) = self.decode_logged(a, "left") else {
            return false;
        };
        let Some(right) = self.decode_logged(b, "right") else {
            return false;
        };
        let equal = left.equivalent(&right, self.numeric);
        trace!(equal, numeric = ?self.numeric, "structural comparison");
        equal
    }

    fn decode_logged(&self, text: &str, side: &'static str) -> Option<StructuralValue> {
        match self.decoder.decode(text) {
            Ok(tree) => Some(tree),
            Err(e) => {
                debug!(side, error = %e, "document failed to decode; not equivalent");
                None
            }
        }
    }
}

/// Returns `true` if two JSON documents decode to the same structure.
///
/// Uses the strict numeric policy and default limits.
#[must_use]
pub fn equivalent(a: &str, b: &str) -> bool {
    EquivalenceChecker::<JsonDecoder>::default().equivalent(a, b)
}

/// Decides whether a change to a JSON-valued attribute is only textual.
///
/// `key` identifies the attribute and is only used for logging.
#[must_use]
pub fn suppress_json_diff(key: &str, old: &str, new: &str) -> bool {
    let suppress = equivalent(old, new);
    if suppress {
        debug!(key, "suppressing textual-only JSON diff");
    }
    suppress
}

/// Decodes a JSON document into its canonical tree.
///
/// # Errors
///
/// Returns [`CheckError::Decode`] for invalid JSON and
/// [`CheckError::LimitExceeded`] for oversized documents.
pub fn expand_json(text: &str) -> Result<StructuralValue> {
    JsonDecoder::default().decode(text)
}

/// Re-serializes a JSON document in canonical form: sorted keys, no
/// insignificant whitespace.
///
/// # Errors
///
/// Returns the decode error if `text` is not valid JSON.
pub fn normalize_json(text: &str) -> Result<String> {
    let tree = expand_json(text)?;
    serde_json::to_string(&tree).map_err(|e| CheckError::json(&e))
}
