//! Init command implementation

use crate::config::{Config, PathsConfig};
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::info;

/// Write the default configuration, refusing to overwrite an existing
/// one unless `force` is set
pub fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    let base = base_dir.unwrap_or_else(Config::default_base_dir);
    let config_path = base.join("config.toml");

    if config_path.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config_path.display().to_string(),
        ));
    }

    let mut config = Config::default();
    config.paths = PathsConfig {
        config_file: config_path.clone(),
        base_dir: base,
    };
    config.save()?;
    info!("Created config at {:?}", config_path);

    Ok(config)
}
