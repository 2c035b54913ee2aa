//! Project configuration read from `.gitwizard.toml`.
//!
//! Configuration is an explicit value handed to the orchestrator and the
//! writers; nothing here is process-global.

mod loader;

pub use loader::{
    directory_ancestors, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE,
};

use crate::analyzers::{DEFAULT_EXTENSIONS, DEFAULT_MIN_LENGTH};
use crate::errors::{GitwizardError, Result};
use crate::io::OutputFormat;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitwizardConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

impl GitwizardConfig {
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
    }
}

/// Settings consumed by the analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// File name suffixes selected for code scans.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Window length used by `duplicates` when none is given.
    #[serde(default = "default_min_duplicate_lines")]
    pub min_duplicate_lines: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            min_duplicate_lines: default_min_duplicate_lines(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_duplicate_lines < 1 {
            return Err(GitwizardError::config(
                "analysis.min_duplicate_lines must be at least 1",
                None,
            ));
        }
        if self.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(GitwizardError::config(
                "analysis.extensions must not contain empty entries",
                None,
            ));
        }
        Ok(())
    }
}

/// Rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub default_format: OutputFormat,

    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            color: default_color(),
        }
    }
}

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

pub fn default_min_duplicate_lines() -> usize {
    DEFAULT_MIN_LENGTH
}

pub fn default_color() -> bool {
    true
}
