//! Configuration resolution for origin-sync
//!
//! Turns the sparse, as-authored configuration file into fully resolved,
//! immutable configuration values:
//!
//! - [`StandardBaseConfig`]: settings shared by every origin, with all paths
//!   made absolute against the config directory
//! - [`StandardOriginConfig`]: one per origin, defaults inherited from the
//!   base config and overridden by the origin's own fields
//!
//! ## Usage
//! ```rust,ignore
//! use origin_sync_config::{normalize_from_path, JsonFileLoader};
//!
//! let normalized = normalize_from_path(&JsonFileLoader::new(), root_dir, config_dir)?;
//! for origin in &normalized.origins {
//!     println!("{} -> {:?}", origin.name, origin.origin_url);
//! }
//! ```

mod loader;
mod normalizer;
mod paths;
mod raw;
mod standard;

pub use loader::{normalize_from_path, ConfigLoader, JsonFileLoader, CONFIG_FILE};
pub use normalizer::{merge_origin, normalize};
pub use paths::PathResolver;
pub use raw::{BaiduTranslateConfig, LegacyOptions, RawConfig, RawOriginConfig};
pub use standard::{
    NormalizedConfig, OriginTemplateOriginalPath, StandardBaseConfig, StandardOriginConfig,
    TemplateOriginalPath,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
