//! Schema/version pairing for persisted state upgrades.

use serde::{Deserialize, Serialize};

use super::block::Block;

/// A schema together with the version of persisted state it interprets.
///
/// State recorded at an older version must be upgraded before this block
/// is used to read it. The pair is immutable: both fields are private and
/// there are no setters, so version and block can never be observed out of
/// sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersionPair {
    version: u64,
    block: Block,
}

impl SchemaVersionPair {
    /// Binds `block` to `version`.
    #[must_use]
    pub const fn new(version: u64, block: Block) -> Self {
        Self { version, block }
    }

    /// Returns the schema version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the schema description.
    #[must_use]
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Returns `true` if state recorded at `stored_version` must be upgraded
    /// before this schema can interpret it.
    #[must_use]
    pub const fn requires_upgrade(&self, stored_version: u64) -> bool {
        stored_version < self.version
    }

    /// Splits the pair into its version and block.
    #[must_use]
    pub fn into_parts(self) -> (u64, Block) {
        (self.version, self.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, AttributeType};

    fn block() -> Block {
        Block::new().with_attribute("name", Attribute::required(AttributeType::String))
    }

    #[test]
    fn test_reads_back() {
        let pair = SchemaVersionPair::new(2, block());
        assert_eq!(pair.version(), 2);
        assert_eq!(pair.block(), &block());
    }

    #[test]
    fn test_requires_upgrade() {
        let pair = SchemaVersionPair::new(2, block());
        assert!(pair.requires_upgrade(0));
        assert!(pair.requires_upgrade(1));
        assert!(!pair.requires_upgrade(2));
        assert!(!pair.requires_upgrade(3));
    }

    #[test]
    fn test_version_zero_never_upgrades() {
        assert!(!SchemaVersionPair::new(0, Block::new()).requires_upgrade(0));
    }

    #[test]
    fn test_into_parts() {
        let (version, b) = SchemaVersionPair::new(7, block()).into_parts();
        assert_eq!(version, 7);
        assert_eq!(b, block());
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(SchemaVersionPair::new(1, block()), SchemaVersionPair::new(1, block()));
        assert_ne!(SchemaVersionPair::new(1, block()), SchemaVersionPair::new(2, block()));
    }

    #[test]
    fn test_serde_roundtrip() {
        let pair = SchemaVersionPair::new(3, block());
        let json = serde_json::to_string(&pair).unwrap();
        let back: SchemaVersionPair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }
}
