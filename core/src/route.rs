#![deny(missing_docs)]

//! # Route Descriptors
//!
//! The input side: what a router knows about each of its endpoints.
//! Routes are plain data and can be built in code or read from JSON/YAML.

use crate::error::{AppError, AppResult};
use crate::schema::Schema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// One HTTP method or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Methods {
    /// A single method, e.g. `"GET"`.
    One(String),
    /// Several methods sharing one handler.
    Many(Vec<String>),
}

impl Methods {
    /// Iterates the methods in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let list: &[String] = match self {
            Methods::One(method) => std::slice::from_ref(method),
            Methods::Many(methods) => methods,
        };
        list.iter().map(String::as_str)
    }
}

impl From<&str> for Methods {
    fn from(method: &str) -> Self {
        Methods::One(method.to_string())
    }
}

/// Request body encoding declared by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`
    Multipart,
}

impl BodyType {
    /// The media type Swagger lists under `consumes`.
    pub fn media_type(&self) -> &'static str {
        match self {
            BodyType::Json => "application/json",
            BodyType::Form => "application/x-www-form-urlencoded",
            BodyType::Multipart => "multipart/form-data",
        }
    }
}

/// Declared response for one status code expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Response body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Schema>,
    /// Response description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// Output declarations keyed by status code expression (`"200"`, `"200,201"`, `"400-499"`).
pub type OutputMap = IndexMap<String, OutputSpec>;

/// Per-location validation schemas of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSpec {
    /// Header schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Schema>,
    /// Query string schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Schema>,
    /// Path parameter schema (older naming).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Schema>,
    /// Path parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Schema>,
    /// Form field schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Schema>,
    /// Request body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Schema>,
    /// File-upload fields, keyed by field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipart: Option<IndexMap<String, Schema>>,
    /// Body encoding.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyType>,
    /// Fallback output declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMap>,
}

/// Free-form route metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Operation override shallow-merged over the generated operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<Value>,
    /// Anything else the router stores.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One endpoint of a router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Router path template, e.g. `/users/:id`.
    pub path: String,
    /// HTTP method(s).
    pub method: Methods,
    /// Validation schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<ValidateSpec>,
    /// Output declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMap>,
    /// Metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RouteMeta>,
}

impl Route {
    /// Creates a route with no validation or metadata.
    pub fn new(method: impl Into<Methods>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            validate: None,
            output: None,
            meta: None,
        }
    }

    /// Sets the validation schemas.
    pub fn validate(mut self, validate: ValidateSpec) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Sets the output declarations.
    pub fn output(mut self, output: OutputMap) -> Self {
        self.output = Some(output);
        self
    }

    /// Sets `meta.swagger`.
    pub fn swagger(mut self, swagger: Value) -> Self {
        self.meta.get_or_insert_with(RouteMeta::default).swagger = Some(swagger);
        self
    }

    /// The swagger override, when it is a JSON object.
    pub fn swagger_meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()?.swagger.as_ref()?.as_object()
    }

    /// Output declarations: `output`, falling back to `validate.output`.
    pub fn outputs(&self) -> Option<&OutputMap> {
        self.output
            .as_ref()
            .or_else(|| self.validate.as_ref()?.output.as_ref())
    }
}

/// An ordered collection of routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Router {
    /// The routes, in registration order.
    pub routes: Vec<Route>,
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Loads a router from a `.json`, `.yaml` or `.yml` file.
    ///
    /// The file holds either `{ routes: [...] }` or a bare list of routes.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read routes file {:?}: {}", path, e))
        })?;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RoutesFile {
            Router(Router),
            List(Vec<Route>),
        }

        let parsed: RoutesFile = match extension(path) {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(match parsed {
            RoutesFile::Router(router) => router,
            RoutesFile::List(routes) => Router { routes },
        })
    }
}

pub(crate) fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("json")
}
