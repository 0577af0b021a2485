//! MergeService: orchestrates sources, applies merge policy, deserializes to DocstreeConfig.

use crate::config::sources::{environment, global_file};
use crate::config::DocstreeConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> user config file -> environment (highest).
    pub fn load() -> Result<DocstreeConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        Self::finish(builder)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<DocstreeConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        let builder = environment::add_to_builder(builder)?;
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<DocstreeConfig, ConfigError> {
        let config: DocstreeConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }
}
