//! Common types and utilities for origin-sync
//!
//! This crate contains the shared error type, the origin type tag and the
//! standard data source model produced by the parser crate and consumed by
//! the engine and CLI.

mod data_source;
mod origin_type;

pub use data_source::{
    BaseClass, Interface, Mod, Parameter, ParameterLocation, Property, StandardDataSource,
    StandardDataType,
};
pub use origin_type::OriginType;

use thiserror::Error;

/// Errors that can occur while normalizing an origin document
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Parse an origin document that may be written as JSON or YAML
///
/// JSON is tried first; YAML is only attempted when JSON parsing fails, so the
/// reported error for malformed input is the JSON one.
pub fn parse_document<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    match serde_json::from_str(text) {
        Ok(doc) => Ok(doc),
        Err(json_err) => serde_yaml::from_str(text).map_err(|yaml_err| {
            SourceError::Parse(format!(
                "document is neither JSON ({}) nor YAML ({})",
                json_err, yaml_err
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_parse_document_json() {
        let doc: Value = parse_document(r#"{"swagger": "2.0"}"#).unwrap();
        assert_eq!(doc["swagger"], "2.0");
    }

    #[test]
    fn test_parse_document_yaml_fallback() {
        let doc: Value = parse_document("openapi: 3.0.1\ninfo:\n  title: Pets\n").unwrap();
        assert_eq!(doc["openapi"], "3.0.1");
        assert_eq!(doc["info"]["title"], "Pets");
    }

    #[test]
    fn test_parse_document_rejects_garbage() {
        let result: Result<Value> = parse_document("{ not: [valid");
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }
}
