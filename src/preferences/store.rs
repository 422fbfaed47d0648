// File-backed preference store.
// Handles JSON serialization and atomic writes of the preferences file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{FocusError, Result};

use super::{PreferenceStore, Preferences};

/// Stores preferences as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config directory.
    pub fn default_location() -> Result<Self> {
        super::paths::preferences_path()
            .map(Self::new)
            .ok_or_else(|| FocusError::Other("Could not determine a config directory".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read preferences, returning the defaults if the file does not exist.
pub fn read_preferences(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }

    let contents = fs::read_to_string(path)?;
    let preferences: Preferences = serde_json::from_str(&contents)?;
    Ok(preferences)
}

/// Write preferences as JSON.
pub fn write_preferences(path: &Path, preferences: &Preferences) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(preferences)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self) -> Result<Preferences> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_preferences(&path))
            .await
            .map_err(|e| FocusError::Other(e.to_string()))?
    }

    async fn set(&self, preferences: &Preferences) -> Result<()> {
        let path = self.path.clone();
        let preferences = preferences.clone();
        tokio::task::spawn_blocking(move || write_preferences(&path, &preferences))
            .await
            .map_err(|e| FocusError::Other(e.to_string()))?
    }
}
