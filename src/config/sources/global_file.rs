//! User config file source: `$XDG_CONFIG_HOME/docstree/config.toml`, optional.

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = match xdg::config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("Skipping user config file: {}", e);
            return Ok(builder);
        }
    };
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
