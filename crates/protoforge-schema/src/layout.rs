//! Where things live inside a game repository.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Directories and limits used by a schema build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Source directories searched for declarations, relative to the root.
    /// Earlier directories claim a file first; nested ones may overlap.
    pub source_dirs: Vec<PathBuf>,
    pub source_extension: String,
    /// Declaration name suffixes worth an entry. File names must contain one.
    pub declaration_suffixes: Vec<String>,
    /// Prototype corpus directory, relative to the root.
    pub corpus_dir: PathBuf,
    /// Upper bound on corpus files parsed per build.
    pub corpus_file_cap: usize,
    pub document_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let source_dirs = [
            "Content.Shared/Components",
            "Content.Server/Components",
            "Content.Client/Components",
            "Content.Shared",
            "Content.Server",
            "Content.Client",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();
        Self {
            source_dirs,
            source_extension: "cs".to_string(),
            declaration_suffixes: vec!["Component".to_string(), "System".to_string()],
            corpus_dir: PathBuf::from("Resources/Prototypes"),
            corpus_file_cap: 50,
            document_extension: "yml".to_string(),
        }
    }
}

const PROTOTYPE_DIRS: [&str; 3] = ["Resources/Prototypes", "Content/Prototypes", "Prototypes"];

/// All prototype documents below the usual prototype directories, sorted.
pub fn find_prototype_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in PROTOTYPE_DIRS {
        let dir = root.join(dir);
        if !dir.is_dir() {
            continue;
        }
        let pattern = format!("{}/**/*.yml", glob::Pattern::escape(&dir.to_string_lossy()));
        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(pattern, "invalid glob pattern: {e}");
                continue;
            }
        };
        for path in paths {
            match path {
                Ok(path) => files.push(path),
                Err(e) => warn!("skipping unreadable path: {e}"),
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Heuristic check that `root` is a checkout of the game repository.
///
/// Requires a solution file whose name mentions `station` or `ss14` next to
/// the `Resources/Textures` and `Resources/Prototypes` directories.
pub fn is_game_repository(root: &Path) -> bool {
    if !root.is_dir() {
        return false;
    }
    let pattern = format!("{}/*.sln", glob::Pattern::escape(&root.to_string_lossy()));
    let has_solution = glob::glob(&pattern).is_ok_and(|paths| {
        paths.filter_map(|p| p.ok()).any(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_lowercase())
                .is_some_and(|name| name.contains("station") || name.contains("ss14"))
        })
    });
    has_solution
        && root.join("Resources/Textures").is_dir()
        && root.join("Resources/Prototypes").is_dir()
}
