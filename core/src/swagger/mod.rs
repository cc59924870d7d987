#![deny(missing_docs)]

//! # Swagger Generation
//!
//! - **models**: Serializable Swagger 2.0 structures.
//! - **path**: Router path templates to Swagger templates.
//! - **params**: Validation schemas to parameters.
//! - **responses**: Output declarations to responses.
//! - **operation**: One route to a path table fragment.
//! - **merge**: Fragments to one path table.
//! - **api**: Multi-router document builder.

pub mod api;
pub mod merge;
pub mod models;
pub mod operation;
pub mod params;
pub mod path;
pub mod responses;

pub use api::SwaggerApi;
pub use merge::{merge_paths, routes_to_paths};
pub use models::{
    Info, Operation, ParamLocation, Parameter, ParameterEntry, PathItem, PathTable, Response,
    Responses, SwaggerDocument,
};
pub use operation::{document_path, route_to_paths, PathOptions, WarnFn};
pub use params::validate_to_parameters;
pub use path::swaggerize_path;
pub use responses::output_to_responses;
