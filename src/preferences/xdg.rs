use crate::error::ApiError;
use crate::preferences::PreferenceStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Preferences kept as one JSON object file under the XDG data directory.
pub struct XdgPreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl XdgPreferenceStore {
    /// Store at `$XDG_DATA_HOME/docstree/preferences.json`.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::at(crate::config::xdg::preferences_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Result<Option<String>, ApiError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ApiError::PreferenceError(format!(
                "Failed to read preferences {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(content).filter(|c| !c.trim().is_empty()))
    }

    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>, ApiError> {
        serde_json::from_str(content).map_err(|e| {
            ApiError::PreferenceError(format!(
                "Failed to parse preferences {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ApiError> {
        match self.read_content()? {
            Some(content) => self.parse(&content),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Entries to rewrite. An unparseable file is replaced rather than
    /// blocking every later save.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, ApiError> {
        let Some(content) = self.read_content()? else {
            return Ok(BTreeMap::new());
        };
        self.parse(&content).or_else(|e| {
            tracing::warn!("Discarding unreadable preferences: {}", e);
            Ok(BTreeMap::new())
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::PreferenceError(format!(
                    "Failed to create preferences directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            ApiError::PreferenceError(format!("Failed to serialize preferences: {}", e))
        })?;
        std::fs::write(&self.path, content).map_err(|e| {
            ApiError::PreferenceError(format!(
                "Failed to write preferences to {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl PreferenceStore for XdgPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}
