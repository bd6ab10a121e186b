//! Document decoders.
//!
//! A [`Decoder`] turns text into a [`StructuralValue`]. Decoders must be
//! deterministic and must not silently drop data: anything that cannot be
//! represented faithfully is a decode error.

use serde_json::Number;
use serde_yaml::Value as YamlValue;

use super::value::{Scalar, StructuralValue};
use crate::config::Limits;
use crate::error::{CheckError, Result};

/// Parses serialized documents into canonical trees.
pub trait Decoder: Send + Sync {
    /// Decodes `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Decode`] if `text` is not a valid document and
    /// [`CheckError::LimitExceeded`] if it is too large or too deep.
    fn decode(&self, text: &str) -> Result<StructuralValue>;
}

// ============================================================================
// JSON
// ============================================================================

/// Decodes JSON documents with `serde_json`.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    limits: Limits,
}

impl JsonDecoder {
    /// Creates a decoder enforcing `limits`.
    #[must_use]
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, text: &str) -> Result<StructuralValue> {
        check_size(text, &self.limits)?;
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| CheckError::json(&e))?;
        let tree = StructuralValue::from(value);
        check_depth(&tree, &self.limits)?;
        Ok(tree)
    }
}

// ============================================================================
// YAML
// ============================================================================

/// Decodes YAML documents with `serde_yaml`.
///
/// Mapping keys must be strings, and floats must be finite, so every YAML
/// document accepted here has a JSON equivalent.
#[derive(Debug, Clone, Default)]
pub struct YamlDecoder {
    limits: Limits,
}

impl YamlDecoder {
    /// Creates a decoder enforcing `limits`.
    #[must_use]
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl Decoder for YamlDecoder {
    fn decode(&self, text: &str) -> Result<StructuralValue> {
        check_size(text, &self.limits)?;
        let value: YamlValue = serde_yaml::from_str(text).map_err(|e| CheckError::yaml(&e))?;
        let tree = yaml_to_structure(value)?;
        check_depth(&tree, &self.limits)?;
        Ok(tree)
    }
}

fn yaml_to_structure(yaml: YamlValue) -> Result<StructuralValue> {
    let tree = match yaml {
        YamlValue::Null => StructuralValue::Scalar(Scalar::Null),
        YamlValue::Bool(b) => StructuralValue::Scalar(Scalar::Bool(b)),
        YamlValue::Number(n) => StructuralValue::Scalar(Scalar::Number(yaml_number(&n)?)),
        YamlValue::String(s) => StructuralValue::Scalar(Scalar::String(s)),
        YamlValue::Sequence(seq) => StructuralValue::Sequence(
            seq.into_iter()
                .map(yaml_to_structure)
                .collect::<Result<_>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut out = std::collections::BTreeMap::new();
            for (key, value) in map {
                let key = match key {
                    YamlValue::String(key) => key,
                    other => {
                        return Err(yaml_error(format!(
                            "mapping key {other:?} is not a string"
                        )));
                    }
                };
                out.insert(key, yaml_to_structure(value)?);
            }
            StructuralValue::Mapping(out)
        }
        YamlValue::Tagged(tagged) => yaml_to_structure(tagged.value)?,
    };
    Ok(tree)
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| yaml_error(format!("number {n} has no JSON representation")))
}

fn yaml_error(message: String) -> CheckError {
    CheckError::Decode {
        format: "yaml",
        message,
    }
}

// ============================================================================
// Limits
// ============================================================================

fn check_size(text: &str, limits: &Limits) -> Result<()> {
    if text.len() > limits.max_document_size {
        return Err(CheckError::LimitExceeded {
            what: "document size",
            actual: text.len(),
            limit: limits.max_document_size,
        });
    }
    Ok(())
}

fn check_depth(tree: &StructuralValue, limits: &Limits) -> Result<()> {
    let depth = tree.depth();
    if depth > limits.max_depth {
        return Err(CheckError::LimitExceeded {
            what: "nesting depth",
            actual: depth,
            limit: limits.max_depth,
        });
    }
    Ok(())
}
