use std::path::PathBuf;

use anyhow::{Context, bail};
use protoforge_env::SettingsStore;
use protoforge_schema::is_game_repository;
use tracing::warn;

/// Repository root from the command line, else from stored settings.
pub fn resolve_root(root: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => {
            let store = SettingsStore::open_default()?;
            let settings = store
                .load()
                .with_context(|| format!("Failed to load {}", store.path().display()))?;
            match settings.repo_root {
                Some(root) => root,
                None => bail!("No repository root given; pass --root or run `protoforge settings set-root`"),
            }
        }
    };
    if !root.is_dir() {
        bail!("Repository root {} is not a directory", root.display());
    }
    if !is_game_repository(&root) {
        warn!(root = %root.display(), "does not look like a game repository");
    }
    Ok(root)
}
