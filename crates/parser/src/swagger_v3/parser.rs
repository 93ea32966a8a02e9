//! OpenAPI 3.x document parser

use super::types::OpenApiSpec;
use origin_sync_common::{parse_document, Result, SourceError, StandardDataSource};
use std::fs;
use std::path::Path;

/// OpenAPI 3.x parser
pub struct SwaggerV3Parser {
    spec: OpenApiSpec,
    name: String,
    using_operation_id: bool,
}

impl SwaggerV3Parser {
    /// Load an OpenAPI document from a file path
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        name: &str,
        using_operation_id: bool,
    ) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SourceError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content, name, using_operation_id)
    }

    /// Parse an OpenAPI document from JSON (or YAML) text
    pub fn from_json(json: &str, name: &str, using_operation_id: bool) -> Result<Self> {
        let spec: OpenApiSpec = parse_document(json)?;
        Ok(Self::new(spec, name, using_operation_id))
    }

    /// Parse an OpenAPI document from an already decoded JSON value
    pub fn from_value(value: serde_json::Value, name: &str, using_operation_id: bool) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_value(value)
            .map_err(|e| SourceError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Ok(Self::new(spec, name, using_operation_id))
    }

    fn new(spec: OpenApiSpec, name: &str, using_operation_id: bool) -> Self {
        Self {
            spec,
            name: name.to_string(),
            using_operation_id,
        }
    }

    /// Normalize the document into a standard data source
    pub fn parse(&self) -> Result<StandardDataSource> {
        super::converter::convert_openapi_to_standard(
            &self.spec,
            &self.name,
            self.using_operation_id,
        )
    }

    /// Get reference to the underlying OpenAPI document
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}
