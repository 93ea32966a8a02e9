//! Fully resolved configuration values

use crate::raw::{BaiduTranslateConfig, LegacyOptions};
use origin_sync_common::OriginType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Configuration shared by every origin
///
/// Produced once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardBaseConfig {
    /// Project root
    pub root_dir: PathBuf,

    /// Directory holding the config file; relative paths resolve against it
    pub config_dir: PathBuf,

    /// True when the config declares a non-empty `origins` list
    pub has_origins: bool,

    /// Always false when `has_origins` is false
    pub using_multiple_origins: bool,

    pub using_operation_id: bool,

    pub origin_url: Option<String>,

    pub origin_type: Option<String>,

    pub out_dir: Option<PathBuf>,

    pub common_template_path: Option<PathBuf>,

    pub template_path: Option<PathBuf>,

    pub transform_path: Option<PathBuf>,

    pub fetch_method_path: Option<PathBuf>,

    /// Raw path strings before resolution
    pub template_original_path: TemplateOriginalPath,

    pub scanned_range: Vec<PathBuf>,

    pub baidu_translate_configs: Option<Vec<BaiduTranslateConfig>>,

    pub polling_time: Option<u64>,

    pub prettier_config: Option<Value>,

    pub mocks: Option<Value>,

    #[serde(flatten)]
    pub legacy: LegacyOptions,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snapshot of the base config's template-related paths as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOriginalPath {
    pub common_template_path: Option<String>,
    pub template_path: Option<String>,
    pub transform_path: Option<String>,
    pub fetch_method_path: Option<String>,
}

/// Fully resolved configuration of one origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardOriginConfig {
    /// Origin name; empty for the single implicit origin
    pub name: String,

    pub origin_url: Option<String>,

    pub root_dir: PathBuf,

    pub origin_type: Option<String>,

    pub using_operation_id: bool,

    pub custom_template_path: Option<PathBuf>,

    pub template_original_path: OriginTemplateOriginalPath,

    pub baidu_translate_configs: Option<Vec<BaiduTranslateConfig>>,

    /// Unrecognized keys declared on the origin
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snapshot of an origin's template path as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginTemplateOriginalPath {
    pub custom_template_path: Option<String>,
}

impl StandardOriginConfig {
    /// Dialect used to normalize this origin's document
    ///
    /// Returns `None` for a tag that names no known dialect; callers decide
    /// how to fall back. An absent tag is Swagger v2.
    pub fn parsed_origin_type(&self) -> Option<OriginType> {
        match self.origin_type.as_deref() {
            None => Some(OriginType::default()),
            Some(tag) => OriginType::from_tag(tag),
        }
    }

    /// Name used in logs and reports; the implicit origin has no name
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<default>"
        } else {
            &self.name
        }
    }

    /// True when translation credentials are configured
    pub fn has_translate_credentials(&self) -> bool {
        self.baidu_translate_configs
            .as_ref()
            .is_some_and(|configs| !configs.is_empty())
    }
}

/// Output of configuration normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedConfig {
    /// `None` only when no raw config was available
    #[serde(rename = "standardBaseConfig")]
    pub base: Option<StandardBaseConfig>,

    /// Never empty when `base` is present
    #[serde(rename = "standardOriginConfigs")]
    pub origins: Vec<StandardOriginConfig>,
}

impl NormalizedConfig {
    /// True when no raw config was available
    pub fn is_absent(&self) -> bool {
        self.base.is_none()
    }
}
