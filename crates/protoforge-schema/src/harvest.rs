use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use protoforge_document::load_file;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{EntryMap, FieldSchema, ScanConfig, SchemaCatalog, TypeCategory};

pub const INFERRED_FIELD_DESCRIPTION: &str = "Inferred from usage in existing prototypes";

/// Counters of one harvest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Corpus files selected, at most the configured cap.
    pub files_considered: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
    /// Distinct component names seen across parsed files.
    pub components_observed: usize,
}

/// Infers component fields from existing prototype documents.
#[derive(Debug, Clone, Default)]
pub struct CorpusHarvester {
    config: ScanConfig,
}

impl CorpusHarvester {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Union observed component fields into `entries`.
    ///
    /// Only components that already have an entry are touched. Declared
    /// fields are kept as they are; observed names without a declaration get
    /// an [`TypeCategory::Unknown`] field.
    pub fn harvest_and_merge(&self, root: &Path, entries: &mut EntryMap) -> HarvestReport {
        let mut report = HarvestReport::default();
        let corpus = root.join(&self.config.corpus_dir);
        if !corpus.is_dir() {
            return report;
        }

        let files = self.corpus_files(&corpus);
        report.files_considered = files.len();

        let mut observed: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for path in &files {
            match load_file(path) {
                Ok(prototypes) => {
                    report.files_parsed += 1;
                    for component in prototypes.iter().flat_map(|p| &p.components) {
                        observed
                            .entry(component.name.clone())
                            .or_default()
                            .extend(component.fields.keys().cloned());
                    }
                }
                Err(e) => {
                    report.files_failed += 1;
                    debug!(path = %path.display(), "skipping corpus file: {e}");
                }
            }
        }
        report.components_observed = observed.len();

        for (component, fields) in observed {
            let Some(key) = SchemaCatalog::resolve_key(entries, &component) else {
                continue;
            };
            let Some(entry) = entries.get_mut(&key) else {
                continue;
            };
            for field in &fields {
                if !entry.commonly_observed_fields.contains(field) {
                    entry.commonly_observed_fields.push(field.clone());
                }
            }
            for field in fields {
                entry
                    .fields
                    .entry(field.clone())
                    .or_insert_with(|| FieldSchema {
                        name: field,
                        type_category: TypeCategory::Unknown,
                        declared_type: String::new(),
                        description: INFERRED_FIELD_DESCRIPTION.to_string(),
                        default_value: None,
                        required: false,
                    });
            }
        }
        report
    }

    /// Corpus documents in sorted path order, truncated to the cap.
    fn corpus_files(&self, corpus: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(corpus)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(dir = %corpus.display(), "skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == self.config.document_extension.as_str())
            })
            .collect();
        files.sort();
        files.truncate(self.config.corpus_file_cap);
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaEntry;
    use std::fs;

    #[test]
    fn test_missing_corpus_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut entries = EntryMap::new();
        let report = CorpusHarvester::default().harvest_and_merge(dir.path(), &mut entries);
        assert_eq!(report, HarvestReport::default());
    }

    #[test]
    fn test_suffixed_and_bare_names_merge() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("Resources/Prototypes");
        fs::create_dir_all(&corpus).unwrap();
        fs::write(
            corpus.join("lamps.yml"),
            concat!(
                "- id: Lamp\n  components:\n  - type: Power\n    load: 5\n    priority: 1\n",
                "- id: Heater\n  components:\n  - type: PowerComponent\n    load: 8\n    draw: 2\n",
            ),
        )
        .unwrap();

        let mut entries = EntryMap::new();
        entries.insert(
            "Power".to_string(),
            SchemaEntry {
                component_name: "Power".to_string(),
                declaration_name: "PowerComponent".to_string(),
                summary: String::new(),
                source_file: PathBuf::from("PowerComponent.cs"),
                fields: IndexMap::new(),
                commonly_observed_fields: Vec::new(),
            },
        );
        CorpusHarvester::default().harvest_and_merge(dir.path(), &mut entries);

        let power = &entries["Power"];
        assert_eq!(power.commonly_observed_fields, vec!["load", "priority", "draw"]);
        assert_eq!(power.fields.len(), 3);
    }

    #[test]
    fn test_cap_limits_files_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("Resources/Prototypes");
        fs::create_dir_all(&corpus).unwrap();
        for i in 0..5 {
            fs::write(corpus.join(format!("p{i}.yml")), format!("- id: P{i}\n")).unwrap();
        }
        fs::write(corpus.join("broken.yml"), "- id: [\n").unwrap();

        let config = ScanConfig {
            corpus_file_cap: 3,
            ..ScanConfig::default()
        };
        let report = CorpusHarvester::new(config).harvest_and_merge(dir.path(), &mut EntryMap::new());
        // Sorted order puts broken.yml first.
        assert_eq!(report.files_considered, 3);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.files_parsed, 2);
    }
}
