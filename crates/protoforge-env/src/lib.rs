//! Persisted settings for protoforge tools.
//!
//! Settings live in `settings.json` inside the platform configuration
//! directory:
//!
//! - Linux: `~/.config/protoforge/`
//! - macOS: `~/Library/Application Support/dev.protoforge.protoforge/`
//! - Windows: `C:\Users\<User>\AppData\Roaming\protoforge\protoforge\config\`
//!
//! Override with the `$PROTOFORGE_CONFIG_DIR` environment variable.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The settings filename.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Environment variable overriding the settings directory.
pub const CONFIG_DIR_ENV: &str = "PROTOFORGE_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration directory available; set $PROTOFORGE_CONFIG_DIR")]
    NoConfigDir,
}

/// Editor settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Root of the game repository checkout.
    pub repo_root: Option<PathBuf>,
    /// Game resources directory, when it is not `<repo_root>/Resources`.
    pub resources_path: Option<PathBuf>,
}

impl EditorSettings {
    /// The resources directory: the explicit path, else `Resources` under the
    /// repository root.
    pub fn resources_dir(&self) -> Option<PathBuf> {
        self.resources_path
            .clone()
            .or_else(|| self.repo_root.as_ref().map(|root| root.join("Resources")))
    }
}

/// Get the default settings directory.
pub fn default_config_dir() -> Option<PathBuf> {
    config_dir_from(std::env::var_os(CONFIG_DIR_ENV))
}

fn config_dir_from(override_dir: Option<OsString>) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            directories::ProjectDirs::from("dev", "protoforge", "protoforge")
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store for `settings.json` inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILENAME),
        }
    }

    /// Store in the default settings directory.
    pub fn open_default() -> Result<Self, SettingsError> {
        default_config_dir()
            .map(Self::new)
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<EditorSettings, SettingsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(EditorSettings::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Write settings atomically, creating the directory if needed.
    pub fn save(&self, settings: &EditorSettings) -> Result<(), SettingsError> {
        let dir = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, settings)?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_dir_wins() {
        assert_eq!(
            config_dir_from(Some(OsString::from("/tmp/pf"))),
            Some(PathBuf::from("/tmp/pf"))
        );
    }

    #[test]
    fn test_empty_override_ignored() {
        assert_ne!(
            config_dir_from(Some(OsString::new())),
            Some(PathBuf::new())
        );
    }

    #[test]
    fn test_resources_dir() {
        let mut settings = EditorSettings {
            repo_root: Some(PathBuf::from("/repo")),
            resources_path: None,
        };
        assert_eq!(settings.resources_dir(), Some(PathBuf::from("/repo/Resources")));
        settings.resources_path = Some(PathBuf::from("/elsewhere"));
        assert_eq!(settings.resources_dir(), Some(PathBuf::from("/elsewhere")));
    }
}
