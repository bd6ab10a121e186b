//! Structural schema descriptions.
//!
//! A [`Block`] describes one level of configuration: its scalar or
//! collection-typed attributes and its nested blocks. Blocks are plain data,
//! (de)serializable so a registry can load them from JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diag::{AttributePath, Diagnostic, Diagnostics};

// ============================================================================
// Types
// ============================================================================

/// The value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeType {
    /// UTF-8 string
    String,
    /// Integer or floating-point number
    Number,
    /// Boolean
    Bool,
    /// Ordered list of a single element type
    List {
        /// Element type
        element: Box<AttributeType>,
    },
    /// Unordered set of a single element type
    Set {
        /// Element type
        element: Box<AttributeType>,
    },
    /// String-keyed map of a single element type
    Map {
        /// Element type
        element: Box<AttributeType>,
    },
    /// Fixed set of named attributes, each with its own type
    Object {
        /// Attribute types by name
        attributes: BTreeMap<String, AttributeType>,
    },
}

impl AttributeType {
    /// Returns `true` for the scalar kinds that single-value validators
    /// apply to.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Bool)
    }

    /// Creates a list type.
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Creates a set type.
    #[must_use]
    pub fn set_of(element: Self) -> Self {
        Self::Set {
            element: Box::new(element),
        }
    }

    /// Creates a map type.
    #[must_use]
    pub fn map_of(element: Self) -> Self {
        Self::Map {
            element: Box::new(element),
        }
    }
}

/// One attribute of a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Value type
    #[serde(rename = "type")]
    pub ty: AttributeType,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Must be set in configuration
    #[serde(default)]
    pub required: bool,

    /// May be set in configuration
    #[serde(default)]
    pub optional: bool,

    /// Set by the provider when not configured
    #[serde(default)]
    pub computed: bool,

    /// Value must be hidden from output
    #[serde(default)]
    pub sensitive: bool,
}

impl Attribute {
    fn new(ty: AttributeType) -> Self {
        Self {
            ty,
            description: None,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
        }
    }

    /// A required attribute.
    #[must_use]
    pub fn required(ty: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::new(ty)
        }
    }

    /// An optional attribute.
    #[must_use]
    pub fn optional(ty: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::new(ty)
        }
    }

    /// A computed-only attribute.
    #[must_use]
    pub fn computed(ty: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::new(ty)
        }
    }

    /// Marks the attribute sensitive.
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Marks the attribute computed as well (for optional attributes).
    #[must_use]
    pub const fn and_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How a nested block repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    /// At most one instance
    Single,
    /// Exactly one instance, always present (possibly empty)
    Group,
    /// Ordered instances
    List,
    /// Unordered unique instances
    Set,
    /// Instances keyed by label
    Map,
}

/// A nested block type within a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedBlock {
    /// Repetition mode
    pub nesting: NestingMode,

    /// Content of each instance
    pub block: Block,

    /// Minimum number of instances (0 = no minimum)
    #[serde(default)]
    pub min_items: u64,

    /// Maximum number of instances (0 = no maximum)
    #[serde(default)]
    pub max_items: u64,
}

impl NestedBlock {
    /// Creates a nested block with no item limits.
    #[must_use]
    pub const fn new(nesting: NestingMode, block: Block) -> Self {
        Self {
            nesting,
            block,
            min_items: 0,
            max_items: 0,
        }
    }

    /// Sets item limits.
    #[must_use]
    pub const fn items(mut self, min_items: u64, max_items: u64) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }
}

/// One level of a structural schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Attributes by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Attribute>,

    /// Nested block types by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub block_types: BTreeMap<String, NestedBlock>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The whole block is deprecated
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl Block {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this block with an added attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Returns this block with an added nested block type.
    #[must_use]
    pub fn with_block(mut self, name: impl Into<String>, nested: NestedBlock) -> Self {
        self.block_types.insert(name.into(), nested);
        self
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Looks up a nested block type by name.
    #[must_use]
    pub fn nested(&self, name: &str) -> Option<&NestedBlock> {
        self.block_types.get(name)
    }

    /// Returns `true` if the block has no attributes and no nested blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.block_types.is_empty()
    }

    /// Checks the schema itself for authoring mistakes.
    ///
    /// Every problem is reported as an error diagnostic located at the
    /// offending attribute or block; an empty result means the schema is
    /// well-formed.
    #[must_use]
    pub fn internal_validate(&self) -> Diagnostics {
        let mut diags = Vec::new();
        self.validate_at(&AttributePath::new(), &mut diags);
        diags
    }

    fn validate_at(&self, prefix: &AttributePath, diags: &mut Diagnostics) {
        for (name, attr) in &self.attributes {
            let path = prefix.clone().attribute(name.as_str());

            if !is_valid_name(name) {
                diags.push(Diagnostic::error(
                    format!("invalid attribute name '{name}'"),
                    path.clone(),
                ));
            }
            if self.block_types.contains_key(name) {
                diags.push(Diagnostic::error(
                    format!("'{name}' is defined as both an attribute and a block"),
                    path.clone(),
                ));
            }
            if attr.required && (attr.optional || attr.computed) {
                diags.push(Diagnostic::error(
                    "attribute cannot be both required and optional or computed",
                    path,
                ));
            } else if !attr.required && !attr.optional && !attr.computed {
                diags.push(Diagnostic::error(
                    "attribute must be required, optional, or computed",
                    path,
                ));
            }
        }

        for (name, nested) in &self.block_types {
            let path = prefix.clone().attribute(name.as_str());

            if !is_valid_name(name) {
                diags.push(Diagnostic::error(
                    format!("invalid block name '{name}'"),
                    path.clone(),
                ));
            }
            if let Some(message) = nested.items_problem() {
                diags.push(Diagnostic::error(message, path.clone()));
            }
            nested.block.validate_at(&path, diags);
        }
    }
}

impl NestedBlock {
    fn items_problem(&self) -> Option<&'static str> {
        match self.nesting {
            NestingMode::Single if self.min_items > 1 || self.max_items > 1 => {
                Some("min_items and max_items must be 0 or 1 for single nesting")
            }
            NestingMode::Group | NestingMode::Map
                if self.min_items != 0 || self.max_items != 0 =>
            {
                Some("min_items and max_items must be 0 for group and map nesting")
            }
            _ if self.max_items != 0 && self.min_items > self.max_items => {
                Some("min_items cannot be greater than max_items")
            }
            _ => None,
        }
    }
}

/// Attribute and block names are lowercase ASCII letters, digits and
/// underscores.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
