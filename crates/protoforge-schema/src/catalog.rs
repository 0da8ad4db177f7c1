use crate::{EntryMap, SchemaEntry};

const COMPONENT_SUFFIX: &str = "Component";

/// Immutable snapshot of a finished schema build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    entries: EntryMap,
}

impl SchemaCatalog {
    pub fn new(entries: EntryMap) -> Self {
        Self { entries }
    }

    /// Entry by name. A trailing `Component` is stripped when the exact name
    /// is unknown.
    pub fn lookup(&self, name: &str) -> Option<&SchemaEntry> {
        Self::resolve_key(&self.entries, name).and_then(|key| self.entries.get(&key))
    }

    pub(crate) fn resolve_key(entries: &EntryMap, name: &str) -> Option<String> {
        if entries.contains_key(name) {
            return Some(name.to_string());
        }
        name.strip_suffix(COMPONENT_SUFFIX)
            .filter(|stripped| entries.contains_key(*stripped))
            .map(str::to_string)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.values()
    }

    /// Entry names usable in a prototype's `components` list.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|name| !name.ends_with(COMPONENT_SUFFIX))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &EntryMap {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn entry(name: &str) -> SchemaEntry {
        SchemaEntry {
            component_name: name.to_string(),
            declaration_name: name.to_string(),
            summary: String::new(),
            source_file: PathBuf::new(),
            fields: IndexMap::new(),
            commonly_observed_fields: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_strips_component_suffix() {
        let mut entries = EntryMap::new();
        entries.insert("Power".to_string(), entry("Power"));
        entries.insert("GlowSystem".to_string(), entry("GlowSystem"));
        let catalog = SchemaCatalog::new(entries);

        assert!(catalog.lookup("Power").is_some());
        assert!(catalog.lookup("PowerComponent").is_some());
        assert!(catalog.lookup("GlowSystem").is_some());
        assert!(catalog.lookup("Battery").is_none());
        assert_eq!(catalog.component_names().count(), 2);
    }
}
