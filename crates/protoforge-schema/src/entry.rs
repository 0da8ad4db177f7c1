use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// Coarse type bucket of a component field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    String,
    Number,
    Boolean,
    List,
    Dictionary,
    Unknown,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeCategory::String => "string",
            TypeCategory::Number => "number",
            TypeCategory::Boolean => "boolean",
            TypeCategory::List => "list",
            TypeCategory::Dictionary => "dictionary",
            TypeCategory::Unknown => "unknown",
        };
        f.pad(s)
    }
}

/// One field a component accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Canonical YAML name: no leading underscore, first letter lowered.
    pub name: String,
    pub type_category: TypeCategory,
    /// Declared type text, empty for fields only seen in prototypes.
    pub declared_type: String,
    pub description: String,
    pub default_value: Option<String>,
    pub required: bool,
}

/// Reconstructed description of one component or system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEntry {
    /// Declaration name with a trailing `Component` stripped.
    pub component_name: String,
    /// Type name as declared in source.
    pub declaration_name: String,
    pub summary: String,
    pub source_file: PathBuf,
    pub fields: IndexMap<String, FieldSchema>,
    /// Field names observed on this component in existing prototypes.
    pub commonly_observed_fields: Vec<String>,
}

/// Entries keyed by canonical component name.
pub type EntryMap = IndexMap<String, SchemaEntry>;
