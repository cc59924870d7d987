#![deny(missing_docs)]

//! # Route Translation
//!
//! Turns one route descriptor into a path table fragment.

use crate::error::AppResult;
use crate::route::Route;
use crate::schema::{SchemaConverter, SwaggerConverter};
use crate::swagger::models::{Operation, Parameter, ParameterEntry, PathItem, PathTable, Responses};
use crate::swagger::params::validate_to_parameters;
use crate::swagger::path::{join_prefix, path_captures, swaggerize_path};
use crate::swagger::responses::output_to_responses;
use std::fmt;
use std::sync::Arc;

/// Callback receiving non-fatal generation warnings.
pub type WarnFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Options shared by every route translated into one document.
#[derive(Clone)]
pub struct PathOptions {
    /// Responses every operation starts from.
    pub default_responses: Responses,
    /// Prefix prepended to every path.
    pub prefix: Option<String>,
    /// Receives path/method collision warnings.
    pub warn: Option<WarnFn>,
    /// Converter used for every schema.
    pub converter: Arc<dyn SchemaConverter + Send + Sync>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            default_responses: Responses::new(),
            prefix: None,
            warn: None,
            converter: Arc::new(SwaggerConverter),
        }
    }
}

impl fmt::Debug for PathOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathOptions")
            .field("default_responses", &self.default_responses)
            .field("prefix", &self.prefix)
            .field("warn", &self.warn.is_some())
            .finish_non_exhaustive()
    }
}

/// The document path of a raw router path: normalized, then prefixed.
pub fn document_path(raw: &str, prefix: Option<&str>) -> AppResult<String> {
    let path = swaggerize_path(raw)?;
    Ok(match prefix {
        Some(prefix) => join_prefix(prefix, &path),
        None => path,
    })
}

/// Translates one route into `{ path: { method: operation } }`.
pub fn route_to_paths(route: &Route, options: &PathOptions) -> AppResult<PathTable> {
    translate(route, options, options.prefix.as_deref())
}

pub(crate) fn translate(
    route: &Route,
    options: &PathOptions,
    prefix: Option<&str>,
) -> AppResult<PathTable> {
    let converter = options.converter.as_ref();

    // 1. Fresh copy of the defaults
    let mut operation = Operation {
        responses: options.default_responses.clone(),
        ..Default::default()
    };

    // 2-3. Media type and parameters
    if let Some(validate) = &route.validate {
        operation.consumes = validate
            .body_type
            .map(|body_type| vec![body_type.media_type().to_string()]);
        operation.parameters = validate_to_parameters(validate, converter)?
            .into_iter()
            .map(ParameterEntry::from)
            .collect();
    }

    // 4. Declared outputs
    if let Some(output) = route.outputs() {
        output_to_responses(output, &mut operation.responses, converter)?;
    }

    // 5. Author overrides
    if let Some(overrides) = route.meta.as_ref().and_then(|m| m.swagger.as_ref()) {
        match overrides.as_object() {
            Some(overrides) => {
                for skipped in operation.apply_override(overrides) {
                    tracing::warn!(path = %route.path, "ignoring swagger override {}", skipped);
                }
            }
            None => tracing::warn!(path = %route.path, "swagger metadata is not an object"),
        }
    }

    // 6. Undocumented path segments still need a parameter each
    let declares_path = route
        .validate
        .as_ref()
        .is_some_and(|v| v.path.is_some() || v.params.is_some());
    if !operation.has_path_params() && !declares_path {
        let synthesized = path_captures(&route.path)
            .into_iter()
            .map(|name| ParameterEntry::from(Parameter::path(name)));
        operation.parameters.extend(synthesized);
    }

    // 7-8. One operation per method under the document path
    let path = document_path(&route.path, prefix)?;
    let mut item = PathItem::new();
    for method in route.method.iter() {
        item.insert(method.to_lowercase(), operation.clone());
    }
    tracing::debug!(path = %path, methods = item.len(), "translated route");

    let mut paths = PathTable::new();
    paths.insert(path, item);
    Ok(paths)
}
