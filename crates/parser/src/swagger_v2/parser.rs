//! Swagger 2.0 document parser

use super::types::SwaggerSpec;
use origin_sync_common::{parse_document, Result, SourceError, StandardDataSource};
use std::fs;
use std::path::Path;

/// Swagger 2.0 parser
pub struct SwaggerV2Parser {
    /// Loaded Swagger document
    spec: SwaggerSpec,

    /// Origin name
    name: String,

    /// Name interfaces after their `operationId`
    using_operation_id: bool,
}

impl SwaggerV2Parser {
    /// Load a Swagger document from a file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SwaggerV2Parser::from_file("petstore.json", "petstore", true)?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        name: &str,
        using_operation_id: bool,
    ) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SourceError::Parse(format!(
                "Failed to read Swagger file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content, name, using_operation_id)
    }

    /// Parse a Swagger document from JSON (or YAML) text
    pub fn from_json(json: &str, name: &str, using_operation_id: bool) -> Result<Self> {
        let spec: SwaggerSpec = parse_document(json)?;
        Ok(Self::new(spec, name, using_operation_id))
    }

    /// Parse a Swagger document from an already decoded JSON value
    pub fn from_value(value: serde_json::Value, name: &str, using_operation_id: bool) -> Result<Self> {
        let spec: SwaggerSpec = serde_json::from_value(value)
            .map_err(|e| SourceError::Parse(format!("Failed to parse Swagger JSON: {}", e)))?;
        Ok(Self::new(spec, name, using_operation_id))
    }

    fn new(spec: SwaggerSpec, name: &str, using_operation_id: bool) -> Self {
        Self {
            spec,
            name: name.to_string(),
            using_operation_id,
        }
    }

    /// Normalize the document into a standard data source
    pub fn parse(&self) -> Result<StandardDataSource> {
        super::converter::convert_swagger_to_standard(
            &self.spec,
            &self.name,
            self.using_operation_id,
        )
    }

    /// Get reference to the underlying Swagger document
    pub fn spec(&self) -> &SwaggerSpec {
        &self.spec
    }
}
