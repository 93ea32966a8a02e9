//! Integration tests for the origin pipeline

use async_trait::async_trait;
use origin_sync_config::{normalize, RawConfig};
use origin_sync_engine::{
    AcquireError, Fetcher, PassthroughTranslator, PipelineDriver, Result, SourceFetcher,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const PETS_V2: &str = r#"{
    "swagger": "2.0",
    "paths": {
        "/pet": { "get": { "tags": ["pet"], "operationId": "listPets", "responses": {} } }
    }
}"#;

const STORE_V3: &str = r#"{
    "openapi": "3.0.0",
    "paths": {
        "/order": { "post": { "tags": ["store"], "operationId": "placeOrder", "responses": {} } }
    }
}"#;

/// Serves canned documents, finishing later for earlier URLs
struct StaticFetcher {
    documents: HashMap<String, (&'static str, u64)>,
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        match self.documents.get(url) {
            Some((body, delay_ms)) => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(body.to_string())
            }
            None => Err(AcquireError::Status {
                url: url.to_string(),
                status: 500,
            }),
        }
    }
}

/// Panics for one URL and serves the rest from a [`StaticFetcher`]
struct PanickingFetcher {
    panic_url: &'static str,
    inner: StaticFetcher,
}

#[async_trait]
impl Fetcher for PanickingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if url == self.panic_url {
            panic!("fetcher crashed on {}", url);
        }
        self.inner.fetch(url).await
    }
}

fn origins(json: &str) -> Vec<origin_sync_config::StandardOriginConfig> {
    let raw = RawConfig::from_json(json).unwrap();
    normalize(Path::new("/proj"), Path::new("/proj/config"), raw).origins
}

fn static_fetcher() -> StaticFetcher {
    let documents = HashMap::from([
        ("http://pets/api-docs".to_string(), (PETS_V2, 60)),
        ("http://store/api-docs".to_string(), (STORE_V3, 0)),
        ("http://legacy/api-docs".to_string(), (PETS_V2, 20)),
    ]);
    StaticFetcher { documents }
}

fn static_driver() -> PipelineDriver {
    PipelineDriver::new(Arc::new(static_fetcher()), Arc::new(PassthroughTranslator))
}

#[tokio::test]
async fn test_sources_follow_origin_order() {
    let origins = origins(
        r#"{
            "origins": [
                { "name": "pets", "originUrl": "http://pets/api-docs" },
                { "name": "store", "originUrl": "http://store/api-docs", "originType": "SwaggerV3" },
                { "name": "legacy", "originUrl": "http://legacy/api-docs", "originType": "foo" }
            ]
        }"#,
    );

    let report = static_driver().run(&origins).await;

    assert!(report.failures.is_empty());
    let names: Vec<&str> = report.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["pets", "store", "legacy"]);
    assert_eq!(report.sources[1].mods[0].interfaces[0].name, "placeOrder");
    // Unknown originType is normalized as Swagger v2
    assert_eq!(report.sources[2].mods[0].interfaces[0].name, "listPets");
}

#[tokio::test]
async fn test_failing_origins_do_not_abort_siblings() {
    let origins = origins(
        r#"{
            "origins": [
                { "name": "down", "originUrl": "http://down/api-docs" },
                { "name": "pets", "originUrl": "http://pets/api-docs" },
                { "name": "nowhere" }
            ]
        }"#,
    );

    let report = static_driver().run(&origins).await;

    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].name, "pets");
    assert!(!report.all_failed());

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].origin, "down");
    assert!(matches!(
        report.failures[0].error,
        AcquireError::Status { status: 500, .. }
    ));
    assert_eq!(report.failures[1].origin, "nowhere");
    assert!(matches!(
        report.failures[1].error,
        AcquireError::MissingOriginUrl(_)
    ));
}

#[tokio::test]
async fn test_panicking_origin_is_reported_as_aborted() {
    let origins = origins(
        r#"{
            "origins": [
                { "name": "pets", "originUrl": "http://pets/api-docs" },
                { "name": "crash", "originUrl": "http://crash/api-docs" },
                { "name": "store", "originUrl": "http://store/api-docs", "originType": "SwaggerV3" }
            ]
        }"#,
    );
    let fetcher = PanickingFetcher {
        panic_url: "http://crash/api-docs",
        inner: static_fetcher(),
    };
    let driver = PipelineDriver::new(Arc::new(fetcher), Arc::new(PassthroughTranslator));

    let report = driver.run(&origins).await;

    let names: Vec<&str> = report.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["pets", "store"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].origin, "crash");
    match &report.failures[0].error {
        AcquireError::Aborted(origin) => assert_eq!(origin, "crash"),
        other => panic!("expected Aborted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_implicit_origin() {
    let origins = origins(r#"{ "originUrl": "http://pets/api-docs" }"#);
    assert_eq!(origins.len(), 1);

    let report = static_driver().run(&origins).await;
    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].name, "");
}

#[tokio::test]
async fn test_all_failed() {
    let origins = origins(r#"{ "originUrl": "http://down/api-docs" }"#);
    let report = static_driver().run(&origins).await;
    assert!(report.all_failed());
}

#[tokio::test]
async fn test_local_documents_relative_to_root_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/pets.json"), PETS_V2).unwrap();
    std::fs::write(
        dir.path().join("store.yaml"),
        "openapi: 3.0.0\npaths:\n  /order:\n    get:\n      tags: [store]\n      responses: {}\n",
    )
    .unwrap();

    let raw = RawConfig::from_json(
        r#"{
            "origins": [
                { "name": "pets", "originUrl": "docs/pets.json" },
                { "name": "store", "originUrl": "store.yaml", "originType": "SwaggerV3" }
            ]
        }"#,
    )
    .unwrap();
    let origins = normalize(dir.path(), dir.path(), raw).origins;

    let driver = PipelineDriver::new(
        Arc::new(SourceFetcher::new()),
        Arc::new(PassthroughTranslator),
    );
    let report = driver.run(&origins).await;

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.sources[0].interface_count(), 1);
    assert_eq!(report.sources[1].mods[0].interfaces[0].name, "getOrder");
}
