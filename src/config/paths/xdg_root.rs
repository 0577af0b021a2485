//! XDG Base Directory utilities for docstree files.

use crate::error::ApiError;
use std::path::PathBuf;

const APP_DIR: &str = "docstree";

fn home_subdir(parts: &[&str]) -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        parts
            .iter()
            .fold(PathBuf::from(home), |path, part| path.join(part))
    })
}

fn xdg_dir(var: &str, fallback: &[&str]) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => home_subdir(fallback),
    }
}

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })
}

/// Get XDG state home directory
///
/// Returns `$XDG_STATE_HOME` if set, otherwise defaults to `$HOME/.local/state`
pub fn state_home() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"])
}

/// `$XDG_CONFIG_HOME/docstree/config.toml`
pub fn config_file_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/docstree/preferences.json`
pub fn preferences_path() -> Result<PathBuf, ApiError> {
    let data_home = data_home().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;
    Ok(data_home.join(APP_DIR).join("preferences.json"))
}

/// `$XDG_STATE_HOME/docstree/token.json`
pub fn token_cache_path() -> Result<PathBuf, ApiError> {
    let state_home = state_home().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG state home directory (HOME not set)".to_string(),
        )
    })?;
    Ok(state_home.join(APP_DIR).join("token.json"))
}
