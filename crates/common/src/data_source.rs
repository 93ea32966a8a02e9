//! Standard data source model
//!
//! Format-independent description of one origin's API surface. Both the
//! Swagger v2 and Swagger v3 normalizers produce this model, and downstream
//! code generation only ever sees this shape.

use serde::{Deserialize, Serialize};

/// Normalized API surface of one origin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDataSource {
    /// Origin name (empty for the single implicit origin)
    pub name: String,

    /// Shared data structures (Swagger definitions / components.schemas)
    #[serde(default)]
    pub base_classes: Vec<BaseClass>,

    /// Interface groups, one per tag
    #[serde(default)]
    pub mods: Vec<Mod>,
}

/// A named data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseClass {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: Vec<Property>,

    /// Template parameter placeholders for generic definitions (`T0`, `T1`, ...)
    #[serde(default)]
    pub template_args: Vec<String>,
}

/// A field of a base class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    pub data_type: StandardDataType,
}

/// A group of interfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

/// A single HTTP operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub name: String,

    /// Lower-case HTTP method
    pub method: String,

    pub path: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    pub response: StandardDataType,
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    pub data_type: StandardDataType,
}

/// Where a parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    FormData,
}

impl ParameterLocation {
    /// Map a Swagger/OpenAPI `in` value
    pub fn from_swagger(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            "body" => Some(ParameterLocation::Body),
            "formData" => Some(ParameterLocation::FormData),
            _ => None,
        }
    }
}

/// Format-independent data type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StandardDataType {
    String,
    Integer,
    Number,
    Boolean,
    File,
    /// Free-form object without declared properties
    Object,
    #[default]
    Any,
    Array(Box<StandardDataType>),
    /// String-keyed map (`additionalProperties`)
    Map(Box<StandardDataType>),
    /// Reference to a base class, with type arguments for generic definitions
    Reference {
        name: String,
        #[serde(default)]
        args: Vec<StandardDataType>,
    },
    Enum(Vec<serde_json::Value>),
}

impl StandardDataType {
    /// Reference to a non-generic base class
    pub fn reference(name: impl Into<String>) -> Self {
        StandardDataType::Reference {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Names of every base class this type mentions, outermost first
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            StandardDataType::Reference { name, args } => {
                names.push(name.as_str());
                for arg in args {
                    arg.collect_references(names);
                }
            }
            StandardDataType::Array(inner) | StandardDataType::Map(inner) => {
                inner.collect_references(names)
            }
            _ => {}
        }
    }
}

impl StandardDataSource {
    /// Create an empty data source for an origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_classes: Vec::new(),
            mods: Vec::new(),
        }
    }

    /// Total number of interfaces across all mods
    pub fn interface_count(&self) -> usize {
        self.mods.iter().map(|m| m.interfaces.len()).sum()
    }

    /// Look up a base class by name
    pub fn base_class(&self, name: &str) -> Option<&BaseClass> {
        self.base_classes.iter().find(|c| c.name == name)
    }

    /// Look up a mod by name
    pub fn find_mod(&self, name: &str) -> Option<&Mod> {
        self.mods.iter().find(|m| m.name == name)
    }

    /// References to base classes that the data source does not define
    ///
    /// A well-formed origin yields an empty list; the engine logs anything
    /// returned here so broken `$ref`s surface before code generation.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut dangling: Vec<String> = Vec::new();
        let mut record = |data_type: &StandardDataType, template_args: &[String]| {
            for name in data_type.referenced_names() {
                if template_args.iter().any(|arg| arg == name) {
                    continue;
                }
                if self.base_class(name).is_none() && !dangling.iter().any(|d| d == name) {
                    dangling.push(name.to_string());
                }
            }
        };

        for class in &self.base_classes {
            for property in &class.properties {
                record(&property.data_type, &class.template_args);
            }
        }

        for interface in self.mods.iter().flat_map(|m| &m.interfaces) {
            record(&interface.response, &[]);
            for parameter in &interface.parameters {
                record(&parameter.data_type, &[]);
            }
        }

        dangling
    }
}
