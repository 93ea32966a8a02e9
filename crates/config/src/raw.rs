//! As-authored configuration
//!
//! Mirrors the JSON config file. Every field is optional and path values are
//! kept as the user wrote them; resolution happens in the normalizer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Declared origins, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origins: Option<Vec<RawOriginConfig>>,

    /// URL or path of the single implicit origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_url: Option<String>,

    /// Origin type tag (`SwaggerV2`, `SwaggerV3`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_type: Option<String>,

    /// Only a JSON boolean is honored; anything else means `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_operation_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_multiple_origins: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_template_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_method_path: Option<String>,

    /// Only honored when it is an array of strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_range: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baidu_translate_configs: Option<Vec<BaiduTranslateConfig>>,

    /// Seconds between origin refreshes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_time: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prettier_config: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mocks: Option<Value>,

    /// Fields kept for configs written against the 1.x file format
    #[serde(flatten)]
    pub legacy: LegacyOptions,

    /// Unrecognized keys, passed through to the standard config untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw per-origin configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOriginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_operation_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_template_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baidu_translate_configs: Option<Vec<BaiduTranslateConfig>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Credentials for the Baidu translation API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaiduTranslateConfig {
    pub app_id: String,
    pub secret: String,
}

/// Options from the 1.x config format
///
/// Newer configs express the same intent through `origins` and
/// `commonTemplatePath`; these are carried so old files keep loading and the
/// values reach downstream generators unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOptions {
    /// Group interfaces by tag name instead of tag description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_by_name: Option<bool>,

    /// Built-in template flavor (`fetch`, `hooks`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,

    /// Target language of the generated code (`typeScript`, `javaScript`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surrounding: Option<String>,
}

impl RawConfig {
    /// Parse a raw config from JSON text
    ///
    /// A document that is literally `null` yields `Ok(None)`.
    pub fn from_json(json: &str) -> serde_json::Result<Option<Self>> {
        serde_json::from_str(json)
    }

    /// Declared origins, if the list is present and non-empty
    pub fn declared_origins(&self) -> Option<&[RawOriginConfig]> {
        self.origins.as_deref().filter(|origins| !origins.is_empty())
    }
}
