use crate::config::{parse_and_validate_config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use crate::io;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Write the default `.gitwizard.toml` into `dir`, returning its path.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    // The template must stay loadable.
    parse_and_validate_config(DEFAULT_CONFIG_TEMPLATE)?;

    io::write_file(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("writing {}", config_path.display()))?;
    Ok(config_path)
}
