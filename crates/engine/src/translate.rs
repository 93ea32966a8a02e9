//! Translation of origin documents

use crate::Result;
use async_trait::async_trait;
use origin_sync_config::{BaiduTranslateConfig, StandardOriginConfig};
use std::path::PathBuf;
use tracing::debug;

/// Origin settings a translator works with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateContext {
    /// Directory holding the translation cache
    pub root_dir: PathBuf,
    pub baidu_translate_configs: Vec<BaiduTranslateConfig>,
}

impl TranslateContext {
    pub fn from_origin(config: &StandardOriginConfig) -> Self {
        Self {
            root_dir: config.root_dir.clone(),
            baidu_translate_configs: config.baidu_translate_configs.clone().unwrap_or_default(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.baidu_translate_configs.is_empty()
    }
}

/// Rewrites non-English identifiers in an origin document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, context: &TranslateContext) -> Result<String>;
}

/// Returns the document unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, context: &TranslateContext) -> Result<String> {
        if context.has_credentials() {
            debug!(
                root_dir = %context.root_dir.display(),
                "translation credentials configured but no translator installed"
            );
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_keeps_text() {
        let context = TranslateContext {
            root_dir: PathBuf::from("/proj"),
            baidu_translate_configs: vec![BaiduTranslateConfig {
                app_id: "id".to_string(),
                secret: "secret".to_string(),
            }],
        };

        let text = r#"{"definitions": {"宠物": {}}}"#;
        let translated = PassthroughTranslator.translate(text, &context).await.unwrap();
        assert_eq!(translated, text);
    }

    #[test]
    fn test_context_without_credentials() {
        let context = TranslateContext::default();
        assert!(!context.has_credentials());
    }
}
