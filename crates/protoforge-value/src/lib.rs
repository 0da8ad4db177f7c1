//! Value tree for prototype documents.
//!
//! A parsed document node is one of three shapes: a scalar, an ordered
//! sequence, or an ordered string-keyed mapping. Every consumer has to handle
//! all three explicitly.

mod error;
mod tree;
mod yaml;

pub use error::Error;
pub use tree::{Mapping, ValueTree};
pub use yaml::{decode_documents, emit_yaml, tree_to_yaml, yaml_to_tree};

#[cfg(test)]
mod tests;

/// Result type for protoforge-value operations
pub type Result<T> = std::result::Result<T, Error>;
