//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::DocstreeConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the user config file and environment.
    pub fn load() -> Result<DocstreeConfig, ApiError> {
        Ok(MergeService::load()?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<DocstreeConfig, ApiError> {
        Ok(MergeService::load_from_file(path)?)
    }

    /// Explicit file when given, standard sources otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<DocstreeConfig, ApiError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }
}
