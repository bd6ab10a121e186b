//! Canonical decoded document trees.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Number;

use crate::config::NumericPolicy;

/// A scalar leaf of a decoded document.
///
/// Numbers keep the decoder's representation, so an integer and a float
/// with the same value are different scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer or floating-point number
    Number(Number),
    /// Text
    String(String),
}

/// The canonical form of a decoded document.
///
/// Derived equality is the strict structural equality: deep, ordered for
/// sequences, unordered for mapping keys (mappings are sorted by key), and
/// exact on scalar kind and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuralValue {
    /// A leaf value
    Scalar(Scalar),
    /// An ordered list
    Sequence(Vec<StructuralValue>),
    /// A mapping with unique keys
    Mapping(BTreeMap<String, StructuralValue>),
}

impl StructuralValue {
    /// Compares two trees under the given numeric policy.
    ///
    /// With [`NumericPolicy::Strict`] this is `==`.
    #[must_use]
    pub fn equivalent(&self, other: &Self, policy: NumericPolicy) -> bool {
        match policy {
            NumericPolicy::Strict => self == other,
            NumericPolicy::Normalized => normalized_eq(self, other),
        }
    }

    /// Returns the nesting depth; scalars have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Sequence(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Mapping(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
        }
    }
}

fn normalized_eq(a: &StructuralValue, b: &StructuralValue) -> bool {
    match (a, b) {
        (StructuralValue::Scalar(Scalar::Number(x)), StructuralValue::Scalar(Scalar::Number(y))) => {
            numbers_eq(x, y)
        }
        (StructuralValue::Scalar(x), StructuralValue::Scalar(y)) => x == y,
        (StructuralValue::Sequence(xs), StructuralValue::Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| normalized_eq(x, y))
        }
        (StructuralValue::Mapping(xm), StructuralValue::Mapping(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| normalized_eq(x, y)))
        }
        _ => false,
    }
}

/// Compares numbers by value, exactly.
///
/// Integral floats inside the 64-bit integer range compare as integers, so
/// `1` equals `1.0` but `9007199254740993` never equals its rounded float.
#[allow(clippy::float_cmp)]
fn numbers_eq(x: &Number, y: &Number) -> bool {
    match (exact(x), exact(y)) {
        (Some(Exact::Int(a)), Some(Exact::Int(b))) => a == b,
        (Some(Exact::Float(a)), Some(Exact::Float(b))) => a == b,
        _ => false,
    }
}

enum Exact {
    Int(i128),
    Float(f64),
}

/// -2^63 and 2^64, both exactly representable.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn exact(n: &Number) -> Option<Exact> {
    if let Some(i) = n.as_i64() {
        return Some(Exact::Int(i.into()));
    }
    if let Some(u) = n.as_u64() {
        return Some(Exact::Int(u.into()));
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && (I64_LOWER..U64_UPPER).contains(&f) {
        // Integral and in range, so the cast is lossless.
        return Some(Exact::Int(f as i128));
    }
    Some(Exact::Float(f))
}

impl From<serde_json::Value> for StructuralValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            serde_json::Value::String(s) => Self::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(v: serde_json::Value) -> StructuralValue {
        StructuralValue::from(v)
    }

    #[test]
    fn test_mapping_order_is_irrelevant() {
        let a: serde_json::Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(tree(a), tree(b));
    }

    #[test]
    fn test_sequence_order_matters() {
        assert_ne!(tree(json!([1, 2])), tree(json!([2, 1])));
    }

    #[test]
    fn test_strict_distinguishes_int_and_float() {
        let a = tree(json!({"a": 1}));
        let b = tree(json!({"a": 1.0}));
        assert!(!a.equivalent(&b, NumericPolicy::Strict));
        assert!(a.equivalent(&b, NumericPolicy::Normalized));
    }

    #[test]
    fn test_normalized_is_not_fuzzy() {
        let a = tree(json!([0.1, "x"]));
        let b = tree(json!([0.100_000_000_1, "x"]));
        assert!(!a.equivalent(&b, NumericPolicy::Normalized));
        assert!(!tree(json!("1")).equivalent(&tree(json!(1)), NumericPolicy::Normalized));
    }

    #[test]
    fn test_normalized_large_integers() {
        let big = tree(json!(u64::MAX));
        let neg = tree(json!(-1));
        assert!(big.equivalent(&big.clone(), NumericPolicy::Normalized));
        assert!(!big.equivalent(&neg, NumericPolicy::Normalized));
    }

    #[test]
    fn test_normalized_never_rounds_integers() {
        let above_2_53 = tree(json!(9_007_199_254_740_993_u64));
        let rounded = tree(json!(9_007_199_254_740_992.0_f64));
        assert!(!above_2_53.equivalent(&rounded, NumericPolicy::Normalized));
        assert!(!rounded.equivalent(&above_2_53, NumericPolicy::Normalized));

        let exact = tree(json!(9_007_199_254_740_992_u64));
        assert!(exact.equivalent(&rounded, NumericPolicy::Normalized));

        // u64::MAX rounds up to 2^64, which is out of integer range.
        let two_64 = tree(json!(18_446_744_073_709_551_616.0_f64));
        assert!(!tree(json!(u64::MAX)).equivalent(&two_64, NumericPolicy::Normalized));
        assert!(two_64.equivalent(&two_64.clone(), NumericPolicy::Normalized));
    }

    #[test]
    fn test_normalized_mapping_keys() {
        let a = tree(json!({"a": 1, "b": [2.0]}));
        let b = tree(json!({"b": [2], "a": 1.0}));
        let c = tree(json!({"b": [2], "c": 1.0}));
        assert!(a.equivalent(&b, NumericPolicy::Normalized));
        assert!(!a.equivalent(&c, NumericPolicy::Normalized));
    }

    #[test]
    fn test_depth() {
        assert_eq!(tree(json!(1)).depth(), 0);
        assert_eq!(tree(json!([])).depth(), 1);
        assert_eq!(tree(json!({"a": [[1]]})).depth(), 3);
    }

    #[test]
    fn test_serializes_with_sorted_keys() {
        let v = tree(json!({"b": null, "a": [true, 1.5, "s"]}));
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"a":[true,1.5,"s"],"b":null}"#
        );
    }
}
