#![deny(missing_docs)]

//! # Routedoc Core
//!
//! Turns a router's per-route validation metadata into a Swagger 2.0 document.

/// Shared error types.
pub mod error;

/// Validation schemas and their conversion.
pub mod schema;

/// Route descriptors (the input).
pub mod route;

/// Swagger models and the route-to-path mapping.
pub mod swagger;

/// File-upload field handling.
pub mod multipart;

/// Pipeline entry points.
pub mod generator;

pub use error::{AppError, AppResult};
pub use generator::{generate, generate_document, generate_document_with, DocOptions};
pub use multipart::{apply_multipart, is_documentable, preprocess_router};
pub use route::{BodyType, Methods, OutputMap, OutputSpec, Route, RouteMeta, Router, ValidateSpec};
pub use schema::{json_schema_to_swagger, Schema, SchemaConverter, SchemaType, SwaggerConverter};
pub use swagger::{
    route_to_paths, routes_to_paths, swaggerize_path, Info, Operation, ParamLocation, Parameter,
    ParameterEntry, PathOptions, Response, SwaggerApi, SwaggerDocument, WarnFn,
};
