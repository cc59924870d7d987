#![deny(missing_docs)]

//! # Swagger Models
//!
//! Serializable Swagger 2.0 structures produced by the generator.
//!
//! Every object keeps unknown keys in a flattened `extra` map so author
//! overrides (`tags`, `summary`, `security`, ...) survive untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// Request header.
    Header,
    /// Query string.
    Query,
    /// Templated path segment.
    Path,
    /// Form field (urlencoded or multipart).
    FormData,
    /// The request body.
    Body,
}

/// A Swagger parameter object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Primitive type (`string`, `integer`, `file`, ...). Absent for body parameters.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Remaining schema keywords (`format`, `enum`, `description`, ...).
    #[serde(flatten)]
    pub keywords: Map<String, Value>,
    /// Whether the parameter must be supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Folded field annotations.
    #[serde(rename = "x-meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl Parameter {
    /// A `string` path parameter marked required.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Path,
            param_type: Some("string".into()),
            keywords: Map::new(),
            required: Some(true),
            schema: None,
            meta: None,
        }
    }

    /// The single `body` parameter carrying a whole schema.
    pub fn body(schema: Value) -> Self {
        Self {
            name: "body".into(),
            location: ParamLocation::Body,
            param_type: None,
            keywords: Map::new(),
            required: None,
            schema: Some(schema),
            meta: None,
        }
    }

    /// Builds a parameter from one converted object property.
    ///
    /// `string` + `binary` becomes `file`. The property's own `required`
    /// list (nested objects) has no meaning on a parameter and is dropped.
    pub fn from_property(
        name: impl Into<String>,
        location: ParamLocation,
        property: Map<String, Value>,
        required: bool,
    ) -> Self {
        let mut keywords = property;
        let mut param_type = match keywords.remove("type") {
            Some(Value::String(t)) => Some(t),
            Some(other) => {
                keywords.insert("type".into(), other);
                None
            }
            None => None,
        };
        keywords.remove("required");

        if param_type.as_deref() == Some("string")
            && keywords.get("format").and_then(Value::as_str) == Some("binary")
        {
            param_type = Some("file".into());
            keywords.remove("format");
        }

        Self {
            name: name.into(),
            location,
            param_type,
            keywords,
            required: required.then_some(true),
            schema: None,
            meta: None,
        }
    }
}

/// A Swagger response object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Response description. Absent on `$ref` responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Headers, examples and other keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Response {
    /// A response with only a description.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// Responses keyed by status code.
pub type Responses = IndexMap<String, Response>;

/// One entry of an operation's parameter list.
///
/// Generated parameters are always [`ParameterEntry::Inline`]. Author supplied
/// items that do not fit [`Parameter`] (`$ref`, vendor shapes) are kept as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterEntry {
    /// A fully described parameter.
    Inline(Parameter),
    /// Any other JSON value, serialized back unchanged.
    Raw(Value),
}

impl ParameterEntry {
    /// The typed parameter, if this entry is one.
    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            ParameterEntry::Inline(param) => Some(param),
            ParameterEntry::Raw(_) => None,
        }
    }

    /// Mutable access to the typed parameter, if this entry is one.
    pub fn as_parameter_mut(&mut self) -> Option<&mut Parameter> {
        match self {
            ParameterEntry::Inline(param) => Some(param),
            ParameterEntry::Raw(_) => None,
        }
    }

    /// True when the entry declares `in: path`.
    pub fn is_path(&self) -> bool {
        match self {
            ParameterEntry::Inline(param) => param.location == ParamLocation::Path,
            ParameterEntry::Raw(value) => value.get("in").and_then(Value::as_str) == Some("path"),
        }
    }
}

impl From<Parameter> for ParameterEntry {
    fn from(param: Parameter) -> Self {
        ParameterEntry::Inline(param)
    }
}

/// A Swagger operation object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Author supplied keys (`tags`, `summary`, `operationId`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Accepted media types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,
    /// Parameters in extraction order.
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: Responses,
}

impl Operation {
    /// Shallow-merges `overrides` over this operation.
    ///
    /// Each key replaces the current value wholesale. A `responses`,
    /// `parameters` or `consumes` value whose outer shape is wrong (not a map,
    /// not a list) is skipped; the other keys still apply. Returns one message
    /// per skipped key.
    pub fn apply_override(&mut self, overrides: &Map<String, Value>) -> Vec<String> {
        let mut skipped = Vec::new();
        for (key, value) in overrides {
            let applied = match key.as_str() {
                "responses" => serde_json::from_value(value.clone()).map(|v| self.responses = v),
                "parameters" => serde_json::from_value(value.clone()).map(|v| self.parameters = v),
                "consumes" => serde_json::from_value(value.clone()).map(|v| self.consumes = v),
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                    Ok(())
                }
            };
            if let Err(e) = applied {
                skipped.push(format!("{}: {}", key, e));
            }
        }
        skipped
    }

    /// True when some parameter is located in the path.
    pub fn has_path_params(&self) -> bool {
        self.parameters.iter().any(ParameterEntry::is_path)
    }

    /// First typed parameter named `name`.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .filter_map(ParameterEntry::as_parameter)
            .find(|p| p.name == name)
    }

    /// Mutable access to the first typed parameter named `name`.
    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters
            .iter_mut()
            .filter_map(ParameterEntry::as_parameter_mut)
            .find(|p| p.name == name)
    }
}

/// Operations of one path keyed by lowercase method.
pub type PathItem = IndexMap<String, Operation>;

/// Paths keyed by Swagger path template.
pub type PathTable = IndexMap<String, PathItem>;

/// The `info` block of a document, copied into the output as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// API version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact, license and other keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    /// Always `"2.0"`.
    pub swagger: String,
    /// Document metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    /// Base path every path is relative to.
    #[serde(rename = "basePath")]
    pub base_path: String,
    /// The path table.
    #[serde(default)]
    pub paths: PathTable,
    /// Other top-level keys (`host`, `schemes`, `securityDefinitions`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SwaggerDocument {
    fn default() -> Self {
        Self {
            swagger: "2.0".into(),
            info: None,
            base_path: "/".into(),
            paths: PathTable::new(),
            extra: Map::new(),
        }
    }
}

impl SwaggerDocument {
    /// Mutable access to the operation at `(path, method)`.
    pub fn operation_mut(&mut self, path: &str, method: &str) -> Option<&mut Operation> {
        self.paths.get_mut(path)?.get_mut(method)
    }
}
