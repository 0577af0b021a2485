use crate::error::ApiError;
use crate::preferences::PreferenceStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-process preference store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
