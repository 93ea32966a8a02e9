//! Raw config → standard config resolution

use crate::paths::PathResolver;
use crate::raw::{RawConfig, RawOriginConfig};
use crate::standard::{
    NormalizedConfig, OriginTemplateOriginalPath, StandardBaseConfig, StandardOriginConfig,
    TemplateOriginalPath,
};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Keys the base config computes itself; user-written copies are discarded
const BASE_SYNTHESIZED_KEYS: &[&str] = &[
    "rootDir",
    "configDir",
    "hasOrigins",
    "templateOriginalPath",
];

/// Keys an origin config computes itself
const ORIGIN_SYNTHESIZED_KEYS: &[&str] = &["templateOriginalPath"];

/// Resolve a raw config into a base config and one config per origin
///
/// `root_dir` and `config_dir` are copied verbatim into the result; every
/// relative path in the raw config is resolved against `config_dir`. An
/// absent raw config yields an empty [`NormalizedConfig`]. The result is a
/// pure function of the inputs.
pub fn normalize(root_dir: &Path, config_dir: &Path, raw: Option<RawConfig>) -> NormalizedConfig {
    let Some(mut raw) = raw else {
        return NormalizedConfig::default();
    };

    let origins = raw.origins.take().filter(|origins| !origins.is_empty());
    let base = build_base_config(root_dir, config_dir, raw, origins.is_some());

    let origin_configs = match origins {
        Some(origins) => origins
            .into_iter()
            .map(|origin| {
                let defaults = origin_defaults(&base, config_dir, &origin);
                merge_origin(defaults, origin, config_dir)
            })
            .collect(),
        None => vec![implicit_origin(&base)],
    };

    debug!(
        config_dir = %config_dir.display(),
        origins = origin_configs.len(),
        "normalized config"
    );

    NormalizedConfig {
        base: Some(base),
        origins: origin_configs,
    }
}

/// Overlay the fields a raw origin sets explicitly onto synthesized defaults
///
/// Precedence, per field, last writer wins:
/// 1. `defaults` (inherited from the base config)
/// 2. every field present on `origin`
///
/// Two fields are resolved rather than copied: `rootDir` is resolved against
/// `config_dir`, and `customTemplatePath` keeps the resolved value already in
/// `defaults` (the raw string stays in `templateOriginalPath`).
/// `usingOperationId` only overrides when it is a JSON boolean.
pub fn merge_origin(
    defaults: StandardOriginConfig,
    origin: RawOriginConfig,
    config_dir: &Path,
) -> StandardOriginConfig {
    let mut merged = defaults;

    if let Some(name) = origin.name {
        merged.name = name;
    }
    if let Some(origin_url) = origin.origin_url {
        merged.origin_url = Some(origin_url);
    }
    if let Some(origin_type) = origin.origin_type {
        merged.origin_type = Some(origin_type);
    }
    if let Some(Value::Bool(using_operation_id)) = origin.using_operation_id {
        merged.using_operation_id = using_operation_id;
    }
    if let Some(root_dir) = PathResolver::resolve(config_dir, origin.root_dir.as_deref()) {
        merged.root_dir = root_dir;
    }
    if let Some(configs) = origin.baidu_translate_configs {
        merged.baidu_translate_configs = Some(configs);
    }
    merged
        .extra
        .extend(without_synthesized_keys(origin.extra, ORIGIN_SYNTHESIZED_KEYS));

    merged
}

fn build_base_config(
    root_dir: &Path,
    config_dir: &Path,
    raw: RawConfig,
    has_origins: bool,
) -> StandardBaseConfig {
    let resolve = |path: &Option<String>| PathResolver::resolve(config_dir, path.as_deref());

    // Empty and non-string entries are dropped rather than kept as nulls
    let scanned_range = match &raw.scanned_range {
        Some(Value::Array(dirs)) => dirs
            .iter()
            .filter_map(|dir| PathResolver::resolve(config_dir, dir.as_str()))
            .collect(),
        _ => Vec::new(),
    };

    StandardBaseConfig {
        root_dir: root_dir.to_path_buf(),
        config_dir: config_dir.to_path_buf(),
        has_origins,
        using_multiple_origins: has_origins && raw.using_multiple_origins.unwrap_or(false),
        using_operation_id: strict_bool(raw.using_operation_id.as_ref()).unwrap_or(true),
        out_dir: resolve(&raw.out_dir),
        common_template_path: resolve(&raw.common_template_path),
        template_path: resolve(&raw.template_path),
        transform_path: resolve(&raw.transform_path),
        fetch_method_path: resolve(&raw.fetch_method_path),
        template_original_path: TemplateOriginalPath {
            common_template_path: raw.common_template_path,
            template_path: raw.template_path,
            transform_path: raw.transform_path,
            fetch_method_path: raw.fetch_method_path,
        },
        scanned_range,
        origin_url: raw.origin_url,
        origin_type: raw.origin_type,
        baidu_translate_configs: raw.baidu_translate_configs,
        polling_time: raw.polling_time,
        prettier_config: raw.prettier_config,
        mocks: raw.mocks,
        legacy: raw.legacy,
        extra: without_synthesized_keys(raw.extra, BASE_SYNTHESIZED_KEYS),
    }
}

/// Drop unknown keys that would shadow a computed field once flattened
fn without_synthesized_keys(
    mut extra: Map<String, Value>,
    keys: &[&str],
) -> Map<String, Value> {
    for key in keys {
        if extra.remove(*key).is_some() {
            debug!(key, "ignoring user-written value for computed config key");
        }
    }
    extra
}

fn origin_defaults(
    base: &StandardBaseConfig,
    config_dir: &Path,
    origin: &RawOriginConfig,
) -> StandardOriginConfig {
    StandardOriginConfig {
        name: String::new(),
        origin_url: None,
        root_dir: base.root_dir.clone(),
        origin_type: base.origin_type.clone(),
        using_operation_id: base.using_operation_id,
        custom_template_path: PathResolver::resolve(
            config_dir,
            origin.custom_template_path.as_deref(),
        ),
        template_original_path: OriginTemplateOriginalPath {
            custom_template_path: origin.custom_template_path.clone(),
        },
        baidu_translate_configs: base.baidu_translate_configs.clone(),
        extra: Default::default(),
    }
}

/// The single origin synthesized when the config declares none
fn implicit_origin(base: &StandardBaseConfig) -> StandardOriginConfig {
    StandardOriginConfig {
        name: String::new(),
        origin_url: base.origin_url.clone(),
        root_dir: base.root_dir.clone(),
        origin_type: base.origin_type.clone(),
        using_operation_id: base.using_operation_id,
        custom_template_path: None,
        template_original_path: OriginTemplateOriginalPath::default(),
        baidu_translate_configs: base.baidu_translate_configs.clone(),
        extra: Default::default(),
    }
}

fn strict_bool(value: Option<&Value>) -> Option<bool> {
    match value {
        Some(Value::Bool(b)) => Some(*b),
        _ => None,
    }
}
