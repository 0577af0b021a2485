//! Lowest layer of the merge: the serialized built-in defaults.

use crate::config::DocstreeConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&DocstreeConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
