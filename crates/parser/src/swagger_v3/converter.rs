//! Converts an OpenAPI 3.x document to a StandardDataSource

use super::types::{
    preferred_schema, OpenApiSpec, Operation, Parameter as OpenApiParameter, Referenced,
    RequestBody, Response,
};
use crate::builder::{assemble_mods, success_response, OperationEntry, TagInfo};
use crate::schema::SchemaConverter;
use origin_sync_common::{
    Parameter, ParameterLocation, Result, SourceError, StandardDataSource, StandardDataType,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const SCHEMAS_PREFIX: &str = "#/components/schemas/";
const PARAMETERS_PREFIX: &str = "#/components/parameters/";
const REQUEST_BODIES_PREFIX: &str = "#/components/requestBodies/";
const RESPONSES_PREFIX: &str = "#/components/responses/";

/// Name given to the parameter that carries a request body
const BODY_PARAMETER: &str = "body";

/// Convert an OpenAPI 3.x document to a StandardDataSource
pub fn convert_openapi_to_standard(
    spec: &OpenApiSpec,
    name: &str,
    using_operation_id: bool,
) -> Result<StandardDataSource> {
    if !spec.openapi.starts_with('3') {
        return Err(SourceError::Parse(format!(
            "Unsupported OpenAPI version: {}",
            spec.openapi
        )));
    }

    let converter = SchemaConverter::new(SCHEMAS_PREFIX, &spec.components.schemas);

    let mut entries = Vec::new();
    for (path, path_item) in &spec.paths {
        for (method, operation) in path_item.operations() {
            let mut parameters = Vec::new();
            for parameter in path_item.parameters.iter().chain(&operation.parameters) {
                let Some(converted) =
                    resolve(parameter, PARAMETERS_PREFIX, &spec.components.parameters)
                        .and_then(|p| convert_parameter(&converter, p))
                else {
                    continue;
                };
                // An operation parameter replaces a path-level one with the same name and location
                parameters.retain(|p: &Parameter| {
                    !(p.name == converted.name && p.location == converted.location)
                });
                parameters.push(converted);
            }

            if let Some(body) = operation.request_body.as_ref().and_then(|body| {
                resolve(body, REQUEST_BODIES_PREFIX, &spec.components.request_bodies)
            }) {
                parameters.push(body_parameter(&converter, body));
            }

            entries.push(OperationEntry {
                tags: operation.tags.clone(),
                operation_id: operation.operation_id.clone(),
                method,
                path: path.clone(),
                description: operation
                    .summary
                    .clone()
                    .or_else(|| operation.description.clone()),
                parameters,
                response: response_type(spec, &converter, operation),
            });
        }
    }

    let tags: Vec<TagInfo> = spec
        .tags
        .iter()
        .map(|tag| TagInfo {
            name: tag.name.clone(),
            description: tag.description.clone(),
        })
        .collect();

    debug!(
        origin = name,
        schemas = spec.components.schemas.len(),
        operations = entries.len(),
        "converted OpenAPI 3 document"
    );

    Ok(StandardDataSource {
        name: name.to_string(),
        base_classes: converter.base_classes(),
        mods: assemble_mods(entries, &tags, using_operation_id),
    })
}

/// Follow a `$ref` into the matching `components` section
fn resolve<'s, T>(
    item: &'s Referenced<T>,
    prefix: &str,
    components: &'s BTreeMap<String, T>,
) -> Option<&'s T> {
    match item {
        Referenced::Inline(inline) => Some(&**inline),
        Referenced::Reference { ref_path } => {
            let name = ref_path.strip_prefix(prefix).unwrap_or(ref_path);
            let resolved = components.get(name);
            if resolved.is_none() {
                warn!(reference = %ref_path, "unresolved component reference");
            }
            resolved
        }
    }
}

fn convert_parameter(
    converter: &SchemaConverter<'_>,
    parameter: &OpenApiParameter,
) -> Option<Parameter> {
    let Some(location) = ParameterLocation::from_swagger(&parameter.location) else {
        debug!(
            parameter = %parameter.name,
            location = %parameter.location,
            "skipping parameter with unknown location"
        );
        return None;
    };

    Some(Parameter {
        name: parameter.name.clone(),
        location,
        description: parameter.description.clone(),
        required: parameter.required || location == ParameterLocation::Path,
        data_type: parameter
            .schema
            .as_ref()
            .map(|schema| converter.data_type(schema))
            .unwrap_or_default(),
    })
}

fn body_parameter(converter: &SchemaConverter<'_>, body: &RequestBody) -> Parameter {
    Parameter {
        name: BODY_PARAMETER.to_string(),
        location: ParameterLocation::Body,
        description: body.description.clone(),
        required: body.required,
        data_type: preferred_schema(&body.content)
            .map(|schema| converter.data_type(schema))
            .unwrap_or_default(),
    }
}

fn response_type(
    spec: &OpenApiSpec,
    converter: &SchemaConverter<'_>,
    operation: &Operation,
) -> StandardDataType {
    success_response(&operation.responses)
        .and_then(|response| resolve(response, RESPONSES_PREFIX, &spec.components.responses))
        .and_then(|response: &Response| preferred_schema(&response.content))
        .map(|schema| converter.data_type(schema))
        .unwrap_or_default()
}
