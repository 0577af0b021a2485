//! Application state for the tree browser.
//!
//! Every transition takes the current state by value and returns the next
//! one. Persistence happens only at the edges through [`AppState::load`] and
//! [`AppState::save`].

use crate::error::ApiError;
use crate::preferences::{PreferenceStore, KEY_FAVORITES, KEY_SELECTED_ROOT, KEY_THEME};
use crate::provider::RootSelector;
use crate::tree::{Node, NodeKind};
use crate::types::NodeID;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ApiError::ConfigError(format!(
                "Invalid theme: {} (must be 'light' or 'dark')",
                other
            ))),
        }
    }
}

/// Favorited node snapshot, stored without children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: NodeID,
    pub name: String,
    pub kind: NodeKind,
    pub link: String,
}

impl From<&Node> for FavoriteEntry {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            link: node.link.clone(),
        }
    }
}

/// Everything the browser remembers between reactive updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub theme: Theme,
    pub root: RootSelector,
    pub favorites: Vec<FavoriteEntry>,
    /// Current search text. Not persisted.
    pub query: String,
}

impl AppState {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_root(mut self, root: RootSelector) -> Self {
        self.root = root;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn toggle_theme(self) -> Self {
        let next = self.theme.toggle();
        self.with_theme(next)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == id)
    }

    /// Add the node as a favorite, or remove it if it already is one.
    pub fn toggle_favorite(mut self, node: &Node) -> Self {
        if self.is_favorite(&node.id) {
            self.favorites.retain(|f| f.id != node.id);
        } else {
            self.favorites.push(FavoriteEntry::from(node));
        }
        self
    }

    pub fn add_favorite(self, node: &Node) -> Self {
        if self.is_favorite(&node.id) {
            return self;
        }
        self.toggle_favorite(node)
    }

    pub fn remove_favorite(mut self, id: &str) -> Self {
        self.favorites.retain(|f| f.id != id);
        self
    }

    /// Restore persisted preferences. Missing or unreadable keys keep their defaults.
    pub fn load(store: &dyn PreferenceStore, default_theme: Theme) -> Self {
        let theme = load_key::<Theme>(store, KEY_THEME).unwrap_or(default_theme);
        let root = load_key::<Option<String>>(store, KEY_SELECTED_ROOT)
            .map(RootSelector::from_persisted)
            .unwrap_or_default();
        let favorites = load_key::<Vec<FavoriteEntry>>(store, KEY_FAVORITES).unwrap_or_default();

        Self {
            theme,
            root,
            favorites,
            query: String::new(),
        }
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), ApiError> {
        store.set(KEY_THEME, &to_json(&self.theme)?)?;
        store.set(KEY_SELECTED_ROOT, &to_json(&self.root.to_persisted())?)?;
        store.set(KEY_FAVORITES, &to_json(&self.favorites)?)?;
        Ok(())
    }
}

fn load_key<T: DeserializeOwned>(store: &dyn PreferenceStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read preference '{}': {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed preference '{}': {}", key, e);
            None
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value)
        .map_err(|e| ApiError::PreferenceError(format!("Failed to serialize preference: {}", e)))
}
