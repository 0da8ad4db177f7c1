//! Component schema reconstruction.
//!
//! The game's component declarations live in C# sources that this crate does
//! not own. [`SourceScanner`] pattern-matches documented declarations and
//! their data fields, [`CorpusHarvester`] adds the field names seen in a
//! bounded sample of existing prototype files, and [`SchemaRegistry`] caches
//! the combined result per repository root.
//!
//! Scanning is best effort. Unreadable directories and files are logged and
//! skipped, so every operation here is infallible.

mod catalog;
mod entry;
mod harvest;
mod layout;
mod registry;
mod scanner;

pub use catalog::SchemaCatalog;
pub use entry::{EntryMap, FieldSchema, SchemaEntry, TypeCategory};
pub use harvest::{CorpusHarvester, HarvestReport, INFERRED_FIELD_DESCRIPTION};
pub use layout::{ScanConfig, find_prototype_files, is_game_repository};
pub use registry::SchemaRegistry;
pub use scanner::{SourceScanner, canonical_field_name, categorize_type};
