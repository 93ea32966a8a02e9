//! Converts a Swagger 2.0 document to a StandardDataSource

use super::types::{Operation, Parameter as SwaggerParameter, ParameterOrRef, SwaggerSpec};
use crate::builder::{assemble_mods, success_response, OperationEntry, TagInfo};
use crate::schema::SchemaConverter;
use origin_sync_common::{
    Parameter, ParameterLocation, Result, SourceError, StandardDataSource, StandardDataType,
};
use tracing::{debug, warn};

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const PARAMETERS_PREFIX: &str = "#/parameters/";

/// Convert a Swagger 2.0 document to a StandardDataSource
pub fn convert_swagger_to_standard(
    spec: &SwaggerSpec,
    name: &str,
    using_operation_id: bool,
) -> Result<StandardDataSource> {
    if !spec.swagger.starts_with('2') {
        return Err(SourceError::Parse(format!(
            "Unsupported Swagger version: {}",
            spec.swagger
        )));
    }

    let converter = SchemaConverter::new(DEFINITIONS_PREFIX, &spec.definitions);

    let mut entries = Vec::new();
    for (path, path_item) in &spec.paths {
        for (method, operation) in path_item.operations() {
            entries.push(OperationEntry {
                tags: operation.tags.clone(),
                operation_id: operation.operation_id.clone(),
                method,
                path: path.clone(),
                description: operation
                    .summary
                    .clone()
                    .or_else(|| operation.description.clone()),
                parameters: convert_parameters(spec, &converter, &path_item.parameters, operation),
                response: response_type(&converter, operation),
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
        definitions = spec.definitions.len(),
        operations = entries.len(),
        "converted Swagger 2.0 document"
    );

    Ok(StandardDataSource {
        name: name.to_string(),
        base_classes: converter.base_classes(),
        mods: assemble_mods(entries, &tags, using_operation_id),
    })
}

/// Path-level parameters followed by the operation's own; an operation
/// parameter replaces a path-level one with the same name and location.
fn convert_parameters(
    spec: &SwaggerSpec,
    converter: &SchemaConverter<'_>,
    path_parameters: &[ParameterOrRef],
    operation: &Operation,
) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = Vec::new();

    for parameter in path_parameters.iter().chain(&operation.parameters) {
        let Some(resolved) = resolve_parameter(spec, parameter) else {
            continue;
        };
        let Some(converted) = convert_parameter(converter, resolved) else {
            continue;
        };

        parameters.retain(|p| !(p.name == converted.name && p.location == converted.location));
        parameters.push(converted);
    }

    parameters
}

fn resolve_parameter<'s>(
    spec: &'s SwaggerSpec,
    parameter: &'s ParameterOrRef,
) -> Option<&'s SwaggerParameter> {
    match parameter {
        ParameterOrRef::Parameter(parameter) => Some(&**parameter),
        ParameterOrRef::Reference { ref_path } => {
            let name = ref_path.strip_prefix(PARAMETERS_PREFIX).unwrap_or(ref_path);
            let resolved = spec.parameters.get(name);
            if resolved.is_none() {
                warn!(reference = %ref_path, "unresolved parameter reference");
            }
            resolved
        }
    }
}

fn convert_parameter(
    converter: &SchemaConverter<'_>,
    parameter: &SwaggerParameter,
) -> Option<Parameter> {
    let Some(location) = ParameterLocation::from_swagger(&parameter.location) else {
        debug!(
            parameter = %parameter.name,
            location = %parameter.location,
            "skipping parameter with unknown location"
        );
        return None;
    };

    let data_type = match location {
        ParameterLocation::Body => parameter
            .schema
            .as_ref()
            .map(|schema| converter.data_type(schema))
            .unwrap_or_default(),
        _ => converter.data_type(&parameter.inline),
    };

    Some(Parameter {
        name: parameter.name.clone(),
        location,
        description: parameter.description.clone(),
        required: parameter.required || location == ParameterLocation::Path,
        data_type,
    })
}

fn response_type(converter: &SchemaConverter<'_>, operation: &Operation) -> StandardDataType {
    success_response(&operation.responses)
        .and_then(|response| response.schema.as_ref())
        .map(|schema| converter.data_type(schema))
        .unwrap_or_default()
}
