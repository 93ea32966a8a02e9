//! OpenAPI 3.x type definitions
//!
//! Simplified representation focusing on schemas and operations

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.1")
    pub openapi: String,

    #[serde(default)]
    pub info: Info,

    /// Tag declarations, in display order
    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,

    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,

    #[serde(rename = "requestBodies")]
    #[serde(default)]
    pub request_bodies: BTreeMap<String, RequestBody>,

    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
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

    #[serde(default)]
    pub trace: Option<Operation>,

    /// Parameters shared by every operation on the path
    #[serde(default)]
    pub parameters: Vec<Referenced<Parameter>>,
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
            ("trace", &self.trace),
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
    pub parameters: Vec<Referenced<Parameter>>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<Referenced<RequestBody>>,

    /// Responses keyed by status code or `default`
    #[serde(default)]
    pub responses: BTreeMap<String, Referenced<Response>>,

    #[serde(default)]
    pub deprecated: bool,
}

/// An inline object or a `$ref` to one under `components`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Referenced<T> {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Inline(Box<T>),
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    /// Media types keyed by content type
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Pick the schema of the preferred media type
///
/// `application/json`, then any `*json` type, then the first declared one.
pub(crate) fn preferred_schema(content: &BTreeMap<String, MediaType>) -> Option<&Schema> {
    content
        .get("application/json")
        .or_else(|| {
            content
                .iter()
                .find(|(media_type, _)| media_type.ends_with("json"))
                .map(|(_, media)| media)
        })
        .or_else(|| content.values().next())
        .and_then(|media| media.schema.as_ref())
}
