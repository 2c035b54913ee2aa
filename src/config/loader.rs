use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::GitwizardConfig;
use crate::errors::{GitwizardError, Result};

pub const CONFIG_FILE_NAME: &str = ".gitwizard.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# gitwizard configuration

[analysis]
extensions = [".py", ".js", ".java", ".cpp", ".c", ".h"]
min_duplicate_lines = 5

[output]
default_format = "terminal"
color = true
"#;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<GitwizardConfig> {
    let config = toml::from_str::<GitwizardConfig>(contents)
        .map_err(|e| GitwizardError::config(format!("failed to parse: {e}"), None))?;
    config.validate()?;
    Ok(config)
}

/// Try loading config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<GitwizardConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Only log actual errors, not "file not found"
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.gitwizard.toml`
pub fn load_config_from(start: &Path) -> GitwizardConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            GitwizardConfig::default()
        })
}
