//! Config file loading

use crate::normalizer::normalize;
use crate::raw::RawConfig;
use crate::standard::NormalizedConfig;
use crate::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up inside the config directory
pub const CONFIG_FILE: &str = "origin-sync.json";

/// Source of raw configuration
pub trait ConfigLoader {
    /// Load the raw config stored in `config_dir`
    ///
    /// `Ok(None)` means the store explicitly holds no configuration.
    fn load(&self, config_dir: &Path) -> Result<Option<RawConfig>>;
}

/// Loads `<config_dir>/<file_name>` as JSON
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    file_name: String,
}

impl JsonFileLoader {
    /// Loader for the default [`CONFIG_FILE`]
    pub fn new() -> Self {
        Self {
            file_name: CONFIG_FILE.to_string(),
        }
    }

    /// Loader for a custom file name
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Full path of the config file inside `config_dir`
    pub fn config_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.file_name)
    }
}

impl Default for JsonFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader for JsonFileLoader {
    fn load(&self, config_dir: &Path) -> Result<Option<RawConfig>> {
        let path = self.config_path(config_dir);
        debug!(path = %path.display(), "loading config file");

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        RawConfig::from_json(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Load the raw config from `config_dir` and normalize it
///
/// Load failures are returned as-is; nothing is retried.
pub fn normalize_from_path(
    loader: &dyn ConfigLoader,
    root_dir: &Path,
    config_dir: &Path,
) -> Result<NormalizedConfig> {
    let raw = loader.load(config_dir)?;
    Ok(normalize(root_dir, config_dir, raw))
}
