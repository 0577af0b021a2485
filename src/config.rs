//! Configuration
//!
//! Layered configuration for docstree: built-in defaults, the user config
//! file under `$XDG_CONFIG_HOME/docstree/config.toml` (or an explicit file)
//! and `DOCSTREE__SECTION__KEY` environment overrides.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use crate::state::Theme;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocstreeConfig {
    #[serde(default)]
    pub drive: DriveConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocstreeConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.drive.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }
}

/// Storage API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Base URL of the Drive v3 API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Records fetched per listing (single page, 1..=1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Shared drives fetched per listing (1..=100)
    #[serde(default = "default_drives_page_size")]
    pub drives_page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_page_size() -> u32 {
    200
}

fn default_drives_page_size() -> u32 {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            page_size: default_page_size(),
            drives_page_size: default_drives_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DriveConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(format!("Invalid drive.api_base URL: {}", self.api_base));
        }
        if !(1..=1000).contains(&self.page_size) {
            return Err(format!(
                "drive.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }
        if !(1..=100).contains(&self.drives_page_size) {
            return Err(format!(
                "drive.drives_page_size must be between 1 and 100, got {}",
                self.drives_page_size
            ));
        }
        if self.timeout_secs == 0 {
            return Err("drive.timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}

/// Terminal presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme used until the user picks one
    #[serde(default)]
    pub default_theme: Theme,

    /// Colored tree output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::default(),
            color: true,
        }
    }
}
