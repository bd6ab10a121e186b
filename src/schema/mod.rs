//! Structural schemas and their versions.

pub mod block;
pub mod versioned;

pub use block::{Attribute, AttributeType, Block, NestedBlock, NestingMode};
pub use versioned::SchemaVersionPair;
