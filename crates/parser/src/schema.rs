//! JSON Schema subset shared by Swagger 2.0 and OpenAPI 3
//!
//! Simplified representation focusing on what the standard model needs.

use crate::naming::{GenericName, NameMapper};
use origin_sync_common::{BaseClass, Property, StandardDataType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Reference to a named schema
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    /// Type: string, number, integer, boolean, array, object, file
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time, binary)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,

    /// Composition; properties of every member are merged
    #[serde(rename = "allOf")]
    #[serde(default)]
    pub all_of: Vec<Schema>,
}

/// `type` is a string in Swagger 2.0 and may be a list in OpenAPI 3.1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    /// The first non-`null` type name
    pub fn primary(&self) -> Option<&str> {
        match self {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types.iter().map(String::as_str).find(|t| *t != "null"),
        }
    }
}

/// `additionalProperties` is either a flag or a value schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// Converts schemas into standard types and base classes
///
/// `ref_prefix` is the JSON pointer prefix of named schemas in the dialect
/// (`#/definitions/` or `#/components/schemas/`).
pub(crate) struct SchemaConverter<'a> {
    ref_prefix: &'static str,
    definitions: &'a BTreeMap<String, Schema>,
}

impl<'a> SchemaConverter<'a> {
    pub(crate) fn new(ref_prefix: &'static str, definitions: &'a BTreeMap<String, Schema>) -> Self {
        Self {
            ref_prefix,
            definitions,
        }
    }

    /// Definition name referenced by `ref_path`
    pub(crate) fn ref_name<'r>(&self, ref_path: &'r str) -> &'r str {
        ref_path
            .strip_prefix(self.ref_prefix)
            .unwrap_or_else(|| ref_path.rsplit('/').next().unwrap_or(ref_path))
    }

    /// Convert a schema to a standard data type
    pub(crate) fn data_type(&self, schema: &Schema) -> StandardDataType {
        if let Some(ref_path) = &schema.ref_path {
            return GenericName::parse(self.ref_name(ref_path)).to_data_type();
        }

        if !schema.enum_values.is_empty() {
            return StandardDataType::Enum(schema.enum_values.clone());
        }

        match schema.schema_type.as_ref().and_then(SchemaType::primary) {
            Some("string") => match schema.format.as_deref() {
                Some("binary") => StandardDataType::File,
                _ => StandardDataType::String,
            },
            Some("integer") => StandardDataType::Integer,
            Some("number") => StandardDataType::Number,
            Some("boolean") => StandardDataType::Boolean,
            Some("file") => StandardDataType::File,
            Some("array") => StandardDataType::Array(Box::new(
                schema
                    .items
                    .as_deref()
                    .map(|items| self.data_type(items))
                    .unwrap_or_default(),
            )),
            Some("object") | None => self.object_type(schema),
            Some(other) => {
                debug!(schema_type = other, "unknown schema type, treating as any");
                StandardDataType::Any
            }
        }
    }

    fn object_type(&self, schema: &Schema) -> StandardDataType {
        if let Some(AdditionalProperties::Schema(values)) = &schema.additional_properties {
            if schema.properties.is_empty() {
                return StandardDataType::Map(Box::new(self.data_type(values)));
            }
        }

        // `allOf: [{ $ref }]` is how OpenAPI 3 attaches descriptions to refs
        if let [single] = schema.all_of.as_slice() {
            if schema.properties.is_empty() {
                return self.data_type(single);
            }
        }

        if schema.schema_type.is_none()
            && schema.properties.is_empty()
            && schema.all_of.is_empty()
            && schema.additional_properties.is_none()
        {
            return StandardDataType::Any;
        }

        StandardDataType::Object
    }

    /// Properties of an object schema, including those merged from `allOf`
    pub(crate) fn properties(&self, schema: &Schema) -> Vec<Property> {
        let mut visited = Vec::new();
        self.collect_properties(schema, &mut visited)
    }

    fn collect_properties(&self, schema: &Schema, visited: &mut Vec<String>) -> Vec<Property> {
        let mut properties = Vec::new();

        if let Some(ref_path) = &schema.ref_path {
            let name = self.ref_name(ref_path).to_string();
            if visited.contains(&name) {
                return properties;
            }
            if let Some(target) = self.definitions.get(&name) {
                visited.push(name);
                properties.extend(self.collect_properties(target, visited));
            }
            return properties;
        }

        for member in &schema.all_of {
            for property in self.collect_properties(member, visited) {
                properties.retain(|p: &Property| p.name != property.name);
                properties.push(property);
            }
        }

        for (name, property_schema) in &schema.properties {
            properties.retain(|p: &Property| &p.name != name);
            properties.push(Property {
                name: name.clone(),
                description: property_schema.description.clone(),
                required: schema.required.contains(name),
                data_type: self.data_type(property_schema),
            });
        }

        properties
    }

    /// One base class per definition
    ///
    /// Generic definitions (`Result«Pet»`, `Result«User»`) collapse into one
    /// templated class (`Result` with `T0`); the first instantiation in name
    /// order supplies the properties.
    pub(crate) fn base_classes(&self) -> Vec<BaseClass> {
        let mut classes: Vec<BaseClass> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (definition_name, schema) in self.definitions {
            let generic = GenericName::parse(definition_name);
            let class_name = NameMapper::to_pascal_case(&generic.base);
            if !seen.insert(class_name.clone()) {
                continue;
            }

            let arg_types: Vec<StandardDataType> =
                generic.args.iter().map(GenericName::to_data_type).collect();
            let template_args: Vec<String> =
                (0..arg_types.len()).map(|i| format!("T{i}")).collect();

            let properties = self
                .properties(schema)
                .into_iter()
                .map(|mut property| {
                    property.data_type = templatize(property.data_type, &arg_types);
                    property
                })
                .collect();

            classes.push(BaseClass {
                name: class_name,
                description: schema.description.clone(),
                properties,
                template_args,
            });
        }

        classes
    }
}

/// Replace concrete type arguments with their template placeholders
///
/// Primitive arguments are left alone: in `Result«string»` every string
/// property would otherwise become `T0`.
fn templatize(data_type: StandardDataType, arg_types: &[StandardDataType]) -> StandardDataType {
    let position = arg_types.iter().position(|arg| {
        *arg == data_type
            && matches!(
                arg,
                StandardDataType::Reference { .. }
                    | StandardDataType::Array(_)
                    | StandardDataType::Map(_)
            )
    });
    if let Some(position) = position {
        return StandardDataType::reference(format!("T{position}"));
    }

    match data_type {
        StandardDataType::Array(inner) => {
            StandardDataType::Array(Box::new(templatize(*inner, arg_types)))
        }
        StandardDataType::Map(inner) => StandardDataType::Map(Box::new(templatize(*inner, arg_types))),
        StandardDataType::Reference { name, args } => StandardDataType::Reference {
            name,
            args: args
                .into_iter()
                .map(|arg| templatize(arg, arg_types))
                .collect(),
        },
        other => other,
    }
}
