use crate::error::ApiError;

pub const KEY_SELECTED_ROOT: &str = "selected_root";
pub const KEY_THEME: &str = "theme";
pub const KEY_FAVORITES: &str = "favorites";

/// Stores JSON-encoded values under string keys.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
}
