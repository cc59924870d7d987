#![deny(missing_docs)]

//! # Document Generation
//!
//! The entry point tying the pipeline together:
//! preprocess → translate → merge → assemble → multipart rewrite → serialize.

use crate::error::{AppError, AppResult};
use crate::multipart::{apply_multipart, preprocess_router};
use crate::route::{extension, Router};
use crate::swagger::{Info, PathOptions, Responses, SwaggerApi, SwaggerDocument, WarnFn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Document-level generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocOptions {
    /// Document metadata, copied into the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    /// `basePath` of the document.
    pub base_path: String,
    /// Where the document is served.
    pub json_path: String,
    /// Prefix prepended to every route path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Responses every operation starts from.
    pub default_responses: Responses,
}

impl Default for DocOptions {
    fn default() -> Self {
        Self {
            info: None,
            base_path: "/".into(),
            json_path: "/swagger.json".into(),
            prefix: None,
            default_responses: Responses::new(),
        }
    }
}

impl DocOptions {
    /// Loads options from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read options file {:?}: {}", path, e))
        })?;
        Ok(match extension(path) {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        })
    }
}

/// Builds the document for `router`.
pub fn generate_document(router: &Router, options: &DocOptions) -> AppResult<SwaggerDocument> {
    generate_document_with(router, options, None)
}

/// Builds the document for `router`, reporting collisions to `warn`.
///
/// The router is read through a copy and never modified. Any conversion or
/// path error aborts generation; no partial document is returned.
pub fn generate_document_with(
    router: &Router,
    options: &DocOptions,
    warn: Option<WarnFn>,
) -> AppResult<SwaggerDocument> {
    let working = preprocess_router(router);
    tracing::debug!(
        routes = router.routes.len(),
        documented = working.routes.len(),
        "preprocessed router"
    );

    let mut api = SwaggerApi::new();
    api.add_router(&working, None);

    let base = SwaggerDocument {
        info: options.info.clone(),
        base_path: options.base_path.clone(),
        ..Default::default()
    };
    let path_options = PathOptions {
        default_responses: options.default_responses.clone(),
        prefix: options.prefix.clone(),
        warn,
        ..Default::default()
    };

    let mut document = api.generate_spec(base, &path_options)?;
    apply_multipart(&working, &mut document, options.prefix.as_deref())?;
    Ok(document)
}

/// Generates the serialized (pretty JSON) document for `router`.
pub fn generate(router: &Router, options: &DocOptions) -> AppResult<String> {
    let document = generate_document(router, options)?;
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_options_defaults() {
        let options = DocOptions::default();
        assert_eq!(options.base_path, "/");
        assert_eq!(options.json_path, "/swagger.json");
        assert!(options.default_responses.is_empty());
    }

    #[test]
    fn test_options_from_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.yaml");
        fs::write(
            &path,
            r#"
info:
  title: Uploads
  version: 2.1.0
basePath: /v2
defaultResponses:
  "500":
    description: Server error
"#,
        )
        .unwrap();

        let options = DocOptions::from_path(&path).unwrap();
        assert_eq!(options.info.unwrap().title.as_deref(), Some("Uploads"));
        assert_eq!(options.base_path, "/v2");
        assert_eq!(options.json_path, "/swagger.json");
        assert_eq!(
            options.default_responses["500"].description.as_deref(),
            Some("Server error")
        );
    }

    #[test]
    fn test_options_from_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, "{ basePath: ").unwrap();
        assert!(matches!(DocOptions::from_path(&path), Err(AppError::Json(_))));
    }

    #[test]
    fn test_generate_skips_untagged_routes() {
        let router = Router::new()
            .route(Route::new("GET", "/internal"))
            .route(Route::new("GET", "/public").swagger(json!({ "tags": ["public"] })));
        let doc = generate_document(&router, &DocOptions::default()).unwrap();
        assert_eq!(doc.paths.keys().collect::<Vec<_>>(), vec!["/public"]);
    }

    #[test]
    fn test_generate_serializes_info_and_base_path() {
        let options = DocOptions {
            info: Some(Info {
                title: Some("Demo".into()),
                version: Some("0.1.0".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let text = generate(&Router::new(), &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "swagger": "2.0",
                "info": { "title": "Demo", "version": "0.1.0" },
                "basePath": "/",
                "paths": {}
            })
        );
    }
}
