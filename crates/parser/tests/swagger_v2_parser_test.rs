//! Integration test for the Swagger 2.0 normalizer

use origin_sync_common::{ParameterLocation, StandardDataType};
use origin_sync_parser::swagger_v2::SwaggerV2Parser;
use pretty_assertions::assert_eq;

const PETSTORE: &str = r##"{
    "swagger": "2.0",
    "info": { "title": "Petstore", "version": "1.0.0" },
    "basePath": "/v2",
    "tags": [
        { "name": "pet", "description": "Everything about pets" },
        { "name": "store" }
    ],
    "paths": {
        "/pet": {
            "post": {
                "tags": ["pet"],
                "operationId": "addPet",
                "summary": "Add a new pet",
                "parameters": [
                    {
                        "in": "body",
                        "name": "body",
                        "required": true,
                        "schema": { "$ref": "#/definitions/Pet" }
                    }
                ],
                "responses": { "200": { "description": "ok" } }
            }
        },
        "/pet/{petId}": {
            "parameters": [
                {
                    "name": "petId",
                    "in": "path",
                    "required": true,
                    "type": "integer",
                    "format": "int64"
                }
            ],
            "get": {
                "tags": ["pet"],
                "operationId": "getPetByIdUsingGET",
                "summary": "Find pet by ID",
                "responses": {
                    "200": {
                        "description": "ok",
                        "schema": { "$ref": "#/definitions/Result«Pet»" }
                    },
                    "404": { "description": "not found" }
                }
            },
            "delete": {
                "tags": ["pet"],
                "operationId": "deletePet",
                "parameters": [{ "$ref": "#/parameters/ApiKey" }],
                "responses": { "default": { "description": "done" } }
            }
        },
        "/store/inventory": {
            "get": {
                "tags": ["store"],
                "operationId": "getInventory",
                "responses": {
                    "200": {
                        "description": "ok",
                        "schema": {
                            "type": "object",
                            "additionalProperties": { "type": "integer" }
                        }
                    }
                }
            }
        },
        "/health": {
            "get": {
                "responses": {
                    "200": { "description": "ok", "schema": { "type": "string" } }
                }
            }
        }
    },
    "parameters": {
        "ApiKey": { "name": "api_key", "in": "header", "type": "string" }
    },
    "definitions": {
        "Pet": {
            "type": "object",
            "required": ["name"],
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "name": { "type": "string", "description": "Pet name" },
                "tags": { "type": "array", "items": { "$ref": "#/definitions/Tag" } }
            }
        },
        "Tag": {
            "type": "object",
            "properties": { "name": { "type": "string" } }
        },
        "Result«Pet»": {
            "type": "object",
            "properties": {
                "code": { "type": "integer" },
                "data": { "$ref": "#/definitions/Pet" }
            }
        },
        "Result«Tag»": {
            "type": "object",
            "properties": {
                "code": { "type": "integer" },
                "data": { "$ref": "#/definitions/Tag" }
            }
        }
    }
}"##;

#[test]
fn test_parse_petstore_mods() {
    let parser = SwaggerV2Parser::from_json(PETSTORE, "petstore", true).expect("Failed to load");
    let source = parser.parse().expect("Failed to parse");

    assert_eq!(source.name, "petstore");

    let mod_names: Vec<&str> = source.mods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(mod_names, vec!["pet", "store", "health"]);
    assert_eq!(
        source.mods[0].description.as_deref(),
        Some("Everything about pets")
    );

    let pet = source.find_mod("pet").expect("pet mod");
    let names: Vec<&str> = pet.interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["addPet", "getPetById", "deletePet"]);

    let health = source.find_mod("health").expect("health mod");
    assert_eq!(health.interfaces[0].name, "getHealth");
    assert_eq!(health.interfaces[0].response, StandardDataType::String);

    assert_eq!(source.interface_count(), 5);
}

#[test]
fn test_parameters_are_merged_and_resolved() {
    let parser = SwaggerV2Parser::from_json(PETSTORE, "petstore", true).unwrap();
    let source = parser.parse().unwrap();
    let pet = source.find_mod("pet").unwrap();

    let add = &pet.interfaces[0];
    assert_eq!(add.method, "post");
    assert_eq!(add.description.as_deref(), Some("Add a new pet"));
    assert_eq!(add.parameters.len(), 1);
    assert_eq!(add.parameters[0].location, ParameterLocation::Body);
    assert!(add.parameters[0].required);
    assert_eq!(add.parameters[0].data_type, StandardDataType::reference("Pet"));

    let delete = &pet.interfaces[2];
    let params: Vec<(&str, ParameterLocation)> = delete
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.location))
        .collect();
    assert_eq!(
        params,
        vec![
            ("petId", ParameterLocation::Path),
            ("api_key", ParameterLocation::Header)
        ]
    );
    assert_eq!(delete.parameters[0].data_type, StandardDataType::Integer);
    assert!(!delete.parameters[1].required);
    assert_eq!(delete.response, StandardDataType::Any);
}

#[test]
fn test_response_types() {
    let parser = SwaggerV2Parser::from_json(PETSTORE, "petstore", true).unwrap();
    let source = parser.parse().unwrap();

    let get = &source.find_mod("pet").unwrap().interfaces[1];
    assert_eq!(
        get.response,
        StandardDataType::Reference {
            name: "Result".to_string(),
            args: vec![StandardDataType::reference("Pet")],
        }
    );

    let inventory = &source.find_mod("store").unwrap().interfaces[0];
    assert_eq!(
        inventory.response,
        StandardDataType::Map(Box::new(StandardDataType::Integer))
    );
}

#[test]
fn test_generic_definitions_become_templates() {
    let parser = SwaggerV2Parser::from_json(PETSTORE, "petstore", true).unwrap();
    let source = parser.parse().unwrap();

    let class_names: Vec<&str> = source.base_classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(class_names, vec!["Pet", "Result", "Tag"]);

    let result = source.base_class("Result").unwrap();
    assert_eq!(result.template_args, vec!["T0".to_string()]);
    assert_eq!(result.properties[1].name, "data");
    assert_eq!(result.properties[1].data_type, StandardDataType::reference("T0"));

    let pet = source.base_class("Pet").unwrap();
    let required: Vec<(&str, bool)> = pet
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.required))
        .collect();
    assert_eq!(required, vec![("id", false), ("name", true), ("tags", false)]);
    assert_eq!(pet.properties[1].description.as_deref(), Some("Pet name"));

    assert!(source.dangling_references().is_empty());
}

#[test]
fn test_path_naming_without_operation_ids() {
    let parser = SwaggerV2Parser::from_json(PETSTORE, "petstore", false).unwrap();
    let source = parser.parse().unwrap();

    let pet = source.find_mod("pet").unwrap();
    let names: Vec<&str> = pet.interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["postPet", "getPetByPetId", "deletePetByPetId"]);
}

#[test]
fn test_yaml_document() {
    let yaml = r#"
swagger: "2.0"
info:
  title: Tiny
  version: "1"
paths:
  /ping:
    get:
      operationId: ping
      responses:
        "200":
          description: ok
          schema:
            type: boolean
"#;
    let source = SwaggerV2Parser::from_json(yaml, "tiny", true)
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(source.mods.len(), 1);
    assert_eq!(source.mods[0].name, "ping");
    assert_eq!(source.mods[0].interfaces[0].response, StandardDataType::Boolean);
}

#[test]
fn test_rejects_non_v2_version() {
    let doc = r#"{ "swagger": "1.2", "paths": {} }"#;
    let parser = SwaggerV2Parser::from_json(doc, "old", true).unwrap();
    assert!(parser.parse().is_err());
}
