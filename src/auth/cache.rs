use crate::auth::AccessToken;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Token persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedToken {
    pub token: String,
    pub obtained_at: DateTime<Utc>,
}

/// Single-token file cache under the XDG state directory.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    /// Cache at `$XDG_STATE_HOME/docstree/token.json`.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::at(crate::config::xdg::token_cache_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<CachedToken>, ApiError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ApiError::Auth(format!(
                "Failed to read token cache {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let cached: CachedToken = serde_json::from_str(&content).map_err(|e| {
            ApiError::Auth(format!(
                "Failed to parse token cache {}: {}",
                self.path.display(),
                e
            ))
        })?;
        if cached.token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(cached))
    }

    pub fn store(&self, token: &AccessToken) -> Result<CachedToken, ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let cached = CachedToken {
            token: token.secret().to_string(),
            obtained_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&cached)
            .map_err(|e| ApiError::Auth(format!("Failed to serialize token cache: {}", e)))?;
        std::fs::write(&self.path, content)?;
        Ok(cached)
    }

    pub fn clear(&self) -> Result<(), ApiError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
