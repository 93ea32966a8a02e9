//! Swagger 2.0 type definitions
//!
//! Simplified representation focusing on definitions and operations

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Swagger document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerSpec {
    /// Swagger version (always "2.0")
    pub swagger: String,

    #[serde(default)]
    pub info: Info,

    #[serde(rename = "basePath")]
    #[serde(default)]
    pub base_path: Option<String>,

    /// Tag declarations, in display order
    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    #[serde(default)]
    pub definitions: BTreeMap<String, Schema>,

    /// Reusable parameters
    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,
}

/// API information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Tag declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Operations available on one path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    #[serde(default)]
    pub options: Option<Operation>,

    #[serde(default)]
    pub head: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    /// Parameters shared by every operation on the path
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

impl PathItem {
    /// Operations in a stable method order
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// Responses keyed by status code or `default`
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,

    #[serde(default)]
    pub deprecated: bool,
}

/// Parameter or a reference to a reusable one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}

/// Parameter definition
///
/// Body parameters carry a `schema`; every other location describes its
/// type inline (`type`, `format`, `items`, `enum`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: path, query, header, body, formData
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub inline: Schema,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub schema: Option<Schema>,
}
