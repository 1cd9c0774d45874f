//! Configuration file handling.
//!
//! Loads the optional `.call_tree.json` file holding default filter criteria
//! and presentation settings. A missing file at the default location means
//! defaults; a missing file the user named explicitly is an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::format::PlainFormatter;
use crate::tree::{CriterionSpec, Filter, FilterError, FilteredDescendants};

/// Name of the configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".call_tree.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },

    #[error("Invalid filter in configuration: {0}")]
    InvalidFilter(#[from] FilterError),
}

/// Filter criteria as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub include: Vec<CriterionSpec>,
    pub exclude: Vec<CriterionSpec>,
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub filtered_descendants: FilteredDescendants,
    /// Rendered values longer than this are cut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value_width: Option<usize>,
    /// Rows per page in the interactive navigator; the terminal height when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Config {
    /// Load from `path`, or from `.call_tree.json` when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly given file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound {
                path: display.clone(),
            },
            _ => ConfigError::ReadFailed {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
            path: display.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// The configured filter, with `extra_include`/`extra_exclude` appended.
    pub fn filter(
        &self,
        extra_include: &[CriterionSpec],
        extra_exclude: &[CriterionSpec],
    ) -> Result<Filter, ConfigError> {
        let include: Vec<CriterionSpec> = self
            .filter
            .include
            .iter()
            .chain(extra_include)
            .cloned()
            .collect();
        let exclude: Vec<CriterionSpec> = self
            .filter
            .exclude
            .iter()
            .chain(extra_exclude)
            .cloned()
            .collect();
        Ok(Filter::from_specs(&include, &exclude)?)
    }

    pub fn formatter(&self) -> PlainFormatter {
        match self.max_value_width {
            Some(width) => PlainFormatter::with_max_width(width),
            None => PlainFormatter::new(),
        }
    }
}
