//! Prototype document model.
//!
//! This crate turns prototype YAML files into [`Prototype`] entities, completes
//! their inheritable attributes from parent prototypes, and exposes a
//! name-indexed read/write interface over the well-known attributes plus an
//! overflow bag for everything else.
//!
//! # Example
//!
//! ```
//! use protoforge_document::{FieldValue, into_batch, parse_document, resolve};
//!
//! let text = r#"
//! - id: MugBase
//!   name: mug
//! - id: Mug
//!   parent: MugBase
//!   components:
//!   - type: Sprite
//!     sprite: objects/mug.png
//! "#;
//!
//! let mut batch = into_batch(parse_document(text).unwrap());
//! resolve(&mut batch);
//!
//! let mug = &batch["Mug"];
//! assert_eq!(mug.name, "mug");
//! assert_eq!(mug.get_field("name"), Some(FieldValue::Text("mug".to_string())));
//! ```

mod definitions;
mod emit;
mod error;
mod field;
mod inherit;
mod parse;
mod prototype;
mod validate;

pub use definitions::{DefaultValue, FIELD_DEFINITIONS, FieldDefinition, FieldKind, is_meaningful};
pub use emit::{to_yaml, to_yaml_value};
pub use error::Error;
pub use field::{FieldValue, PrototypeField};
pub use inherit::{InheritanceReport, inheritance_report, resolve};
pub use parse::{load_and_resolve, load_file, parse_document, parse_prototype, prototypes_from_tree};
pub use prototype::{Component, Placement, Prototype, PrototypeBatch, into_batch};
pub use validate::{Validation, validate};

pub use protoforge_value::{Mapping, ValueTree};

/// Result type for protoforge-document operations
pub type Result<T> = std::result::Result<T, Error>;
