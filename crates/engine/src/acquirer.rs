//! Per-origin acquisition

use crate::fetch::{Fetcher, SourceFetcher};
use crate::translate::{TranslateContext, Translator};
use crate::{AcquireError, Result};
use origin_sync_common::{parse_document, OriginType, StandardDataSource};
use origin_sync_config::{PathResolver, StandardOriginConfig};
use origin_sync_parser::{SwaggerV2Parser, SwaggerV3Parser};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Acquires one origin: fetch, translate, transform
///
/// An acquirer is bound to a single origin config with [`set_config`] and is
/// not shared between tasks; the pipeline creates one per origin.
///
/// [`set_config`]: OriginAcquirer::set_config
pub struct OriginAcquirer {
    fetcher: Arc<dyn Fetcher>,
    translator: Arc<dyn Translator>,
    config: Option<StandardOriginConfig>,
}

impl OriginAcquirer {
    pub fn new(fetcher: Arc<dyn Fetcher>, translator: Arc<dyn Translator>) -> Self {
        Self {
            fetcher,
            translator,
            config: None,
        }
    }

    /// Bind the acquirer to an origin, replacing any previous binding
    pub fn set_config(&mut self, config: StandardOriginConfig) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&StandardOriginConfig> {
        self.config.as_ref()
    }

    fn bound(&self) -> Result<&StandardOriginConfig> {
        self.config.as_ref().ok_or(AcquireError::NotConfigured)
    }

    /// Fetch the raw origin document; failures are returned as-is, without retry
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let config = self.bound()?;
        debug!(origin = %config.display_name(), url, "fetching origin");
        self.fetcher.fetch(url).await
    }

    /// Translate the document with the bound origin's root dir and credentials
    pub async fn translate(&self, json: &str) -> Result<String> {
        let config = self.bound()?;
        let context = TranslateContext::from_origin(config);
        self.translator.translate(json, &context).await
    }

    /// Normalize a decoded origin document with the dialect named by `config`
    ///
    /// An unknown `originType` is normalized as Swagger v2.
    pub fn transform_to_standard(
        &self,
        raw: Value,
        config: &StandardOriginConfig,
    ) -> Result<StandardDataSource> {
        let origin_type = config.parsed_origin_type().unwrap_or_else(|| {
            warn!(
                origin = %config.display_name(),
                origin_type = config.origin_type.as_deref().unwrap_or_default(),
                "unknown originType, normalizing as SwaggerV2"
            );
            OriginType::SwaggerV2
        });

        let source = match origin_type {
            OriginType::SwaggerV2 => {
                SwaggerV2Parser::from_value(raw, &config.name, config.using_operation_id)?.parse()?
            }
            OriginType::SwaggerV3 => {
                SwaggerV3Parser::from_value(raw, &config.name, config.using_operation_id)?.parse()?
            }
        };

        Ok(source)
    }

    /// Hand back a data source that is already standardized
    pub fn passthrough(&self, data_source: StandardDataSource) -> StandardDataSource {
        data_source
    }

    /// Run the whole cycle for the bound origin
    ///
    /// A relative local `originUrl` is read from the origin's root dir.
    pub async fn acquire(&self) -> Result<StandardDataSource> {
        let config = self.bound()?;
        let url = config
            .origin_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AcquireError::MissingOriginUrl(config.display_name().to_string()))?;
        let location = locate(url, &config.root_dir);

        info!(origin = %config.display_name(), url = %location, "acquiring origin");

        let text = self.fetch(&location).await?;
        let translated = self.translate(&text).await?;
        let raw: Value = parse_document(&translated)?;
        let source = self.passthrough(self.transform_to_standard(raw, config)?);

        let dangling = source.dangling_references();
        if !dangling.is_empty() {
            warn!(
                origin = %config.display_name(),
                references = ?dangling,
                "data source references undefined base classes"
            );
        }

        info!(
            origin = %config.display_name(),
            base_classes = source.base_classes.len(),
            mods = source.mods.len(),
            interfaces = source.interface_count(),
            "origin acquired"
        );

        Ok(source)
    }
}

fn locate(url: &str, root_dir: &Path) -> String {
    if SourceFetcher::is_remote(url) || url.starts_with("file://") {
        return url.to_string();
    }

    PathResolver::resolve(root_dir, Some(url))
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockFetcher;
    use crate::translate::{MockTranslator, PassthroughTranslator};
    use mockall::predicate::eq;
    use serde_json::{json, Map};
    use std::path::PathBuf;

    fn origin(origin_type: Option<&str>) -> StandardOriginConfig {
        StandardOriginConfig {
            name: "pets".to_string(),
            origin_url: Some("http://localhost/v2/api-docs".to_string()),
            root_dir: PathBuf::from("/proj"),
            origin_type: origin_type.map(String::from),
            using_operation_id: true,
            custom_template_path: None,
            template_original_path: Default::default(),
            baidu_translate_configs: None,
            extra: Map::new(),
        }
    }

    fn swagger_v2() -> Value {
        json!({
            "swagger": "2.0",
            "paths": {
                "/pet": { "get": { "tags": ["pet"], "operationId": "listPets", "responses": {} } }
            }
        })
    }

    fn openapi_v3() -> Value {
        json!({
            "openapi": "3.0.0",
            "paths": {
                "/pet": { "get": { "tags": ["pet"], "operationId": "listPets", "responses": {} } }
            }
        })
    }

    fn acquirer(fetcher: MockFetcher) -> OriginAcquirer {
        OriginAcquirer::new(Arc::new(fetcher), Arc::new(PassthroughTranslator))
    }

    #[tokio::test]
    async fn test_operations_require_config() {
        let acquirer = acquirer(MockFetcher::new());

        assert!(matches!(
            acquirer.fetch("http://localhost").await,
            Err(AcquireError::NotConfigured)
        ));
        assert!(matches!(
            acquirer.translate("{}").await,
            Err(AcquireError::NotConfigured)
        ));
        assert!(matches!(acquirer.acquire().await, Err(AcquireError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_fetch_delegates_and_propagates_errors() {
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("http://localhost/ok"))
            .times(1)
            .returning(|_| Ok("body".to_string()));
        fetcher
            .expect_fetch()
            .with(eq("http://localhost/missing"))
            .times(1)
            .returning(|url| {
                Err(AcquireError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            });

        let mut acquirer = acquirer(fetcher);
        acquirer.set_config(origin(None));

        assert_eq!(acquirer.fetch("http://localhost/ok").await.unwrap(), "body");
        assert!(matches!(
            acquirer.fetch("http://localhost/missing").await,
            Err(AcquireError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_translate_receives_bound_origin() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|text, context| text == "{}" && context.root_dir == Path::new("/proj"))
            .times(1)
            .returning(|_, _| Ok(r#"{"translated": true}"#.to_string()));

        let mut acquirer = OriginAcquirer::new(Arc::new(MockFetcher::new()), Arc::new(translator));
        acquirer.set_config(origin(None));

        assert_eq!(
            acquirer.translate("{}").await.unwrap(),
            r#"{"translated": true}"#
        );
    }

    #[test]
    fn test_transform_dispatches_on_origin_type() {
        let acquirer = acquirer(MockFetcher::new());

        let v2 = acquirer
            .transform_to_standard(swagger_v2(), &origin(Some("SwaggerV2")))
            .unwrap();
        assert_eq!(v2.name, "pets");
        assert_eq!(v2.mods[0].interfaces[0].name, "listPets");

        let v3 = acquirer
            .transform_to_standard(openapi_v3(), &origin(Some("SwaggerV3")))
            .unwrap();
        assert_eq!(v3.interface_count(), 1);

        // A Swagger 2.0 document under SwaggerV3 is rejected by the v3 normalizer
        assert!(matches!(
            acquirer.transform_to_standard(swagger_v2(), &origin(Some("SwaggerV3"))),
            Err(AcquireError::Transform(_))
        ));
    }

    #[test]
    fn test_unknown_origin_type_falls_back_to_swagger_v2() {
        let acquirer = acquirer(MockFetcher::new());

        let source = acquirer
            .transform_to_standard(swagger_v2(), &origin(Some("foo")))
            .unwrap();
        assert_eq!(source.interface_count(), 1);

        let absent = acquirer
            .transform_to_standard(swagger_v2(), &origin(None))
            .unwrap();
        assert_eq!(absent, source);
    }

    #[test]
    fn test_passthrough_is_identity() {
        let acquirer = acquirer(MockFetcher::new());
        let source = StandardDataSource::new("ready");
        assert_eq!(acquirer.passthrough(source.clone()), source);
    }

    #[tokio::test]
    async fn test_acquire_runs_every_step() {
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("http://localhost/v2/api-docs"))
            .times(1)
            .returning(|_| Ok(swagger_v2().to_string()));

        let mut acquirer = acquirer(fetcher);
        acquirer.set_config(origin(None));

        let source = acquirer.acquire().await.unwrap();
        assert_eq!(source.name, "pets");
        assert_eq!(source.find_mod("pet").unwrap().interfaces.len(), 1);
    }

    #[tokio::test]
    async fn test_acquire_without_origin_url() {
        let mut config = origin(None);
        config.origin_url = Some(String::new());

        let mut acquirer = acquirer(MockFetcher::new());
        acquirer.set_config(config);

        assert!(matches!(
            acquirer.acquire().await,
            Err(AcquireError::MissingOriginUrl(name)) if name == "pets"
        ));
    }

    #[test]
    fn test_locate_relative_paths_under_root_dir() {
        let root = Path::new("/proj/api");
        assert_eq!(locate("docs/swagger.json", root), "/proj/api/docs/swagger.json");
        assert_eq!(locate("/abs/swagger.json", root), "/abs/swagger.json");
        assert_eq!(locate("https://host/api-docs", root), "https://host/api-docs");
        assert_eq!(locate("file:///tmp/a.json", root), "file:///tmp/a.json");
    }
}
