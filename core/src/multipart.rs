#![deny(missing_docs)]

//! # Multipart Handling
//!
//! File-upload fields live under `validate.multipart`, a slot the parameter
//! extractor does not read. Generation runs in two halves around it:
//!
//! 1. [`preprocess_router`] copies the router, keeps only documented routes
//!    and folds multipart fields into `validate.query` so they are extracted.
//! 2. [`apply_multipart`] finds those parameters in the finished document,
//!    moves them to `formData` and applies their annotations.

use crate::error::AppResult;
use crate::route::{Route, Router};
use crate::schema::Schema;
use crate::swagger::models::{ParamLocation, SwaggerDocument};
use crate::swagger::operation::document_path;
use serde_json::Value;

/// A route is documented when its `meta.swagger.tags` is a non-empty list.
pub fn is_documentable(route: &Route) -> bool {
    route
        .swagger_meta()
        .and_then(|swagger| swagger.get("tags"))
        .and_then(Value::as_array)
        .is_some_and(|tags| !tags.is_empty())
}

/// Returns a working copy of `router` ready for generation.
///
/// Undocumented routes are dropped. For the others, `validate.multipart`
/// keys are merged into `validate.query`, multipart winning on conflict.
/// The caller's router is never modified.
pub fn preprocess_router(router: &Router) -> Router {
    let routes = router
        .routes
        .iter()
        .filter(|route| is_documentable(route))
        .cloned()
        .map(|mut route| {
            if let Some(validate) = route.validate.as_mut() {
                if let Some(multipart) = &validate.multipart {
                    let query = validate
                        .query
                        .get_or_insert_with(|| Schema::object(Vec::<(String, Schema)>::new()));
                    if !query.merge_keys(multipart) {
                        tracing::warn!(
                            path = %route.path,
                            "query schema is not an object, multipart fields left out"
                        );
                    }
                }
            }
            route
        })
        .collect();

    Router { routes }
}

/// Rewrites multipart parameters of a generated document.
///
/// For every route of the preprocessed `router` declaring multipart fields,
/// and every method it registers, the first parameter named after each field
/// moves to `in: formData`. The field's annotations fold into `x-meta`, later
/// ones overwriting earlier keys, and `swaggerType: file` sets `type: file`.
pub fn apply_multipart(
    router: &Router,
    document: &mut SwaggerDocument,
    prefix: Option<&str>,
) -> AppResult<()> {
    for route in &router.routes {
        let Some(multipart) = route.validate.as_ref().and_then(|v| v.multipart.as_ref()) else {
            continue;
        };
        let path = document_path(&route.path, prefix)?;

        for method in route.method.iter() {
            let Some(operation) = document.operation_mut(&path, &method.to_lowercase()) else {
                continue;
            };

            for (field, schema) in multipart {
                let Some(param) = operation.parameter_mut(field) else {
                    continue;
                };

                param.location = ParamLocation::FormData;

                if !schema.metas.is_empty() {
                    let meta = param.meta.get_or_insert_with(Default::default);
                    for annotation in &schema.metas {
                        for (key, value) in annotation {
                            meta.insert(key.clone(), value.clone());
                        }
                    }
                }

                let is_file = param
                    .meta
                    .as_ref()
                    .and_then(|m| m.get("swaggerType"))
                    .and_then(Value::as_str)
                    == Some("file");
                if is_file {
                    param.param_type = Some("file".into());
                }
            }
        }
    }
    Ok(())
}
