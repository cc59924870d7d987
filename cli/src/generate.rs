#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads a routes file and writes the Swagger document.

use routedoc_core::error::{AppError, AppResult};
use routedoc_core::{generate, generate_document, DocOptions, Router};
use std::fs;
use std::path::PathBuf;

/// Where routes and options come from. Shared by `generate` and `serve`.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Routes file (.json, .yaml or .yml).
    #[clap(long, env = "ROUTEDOC_ROUTES")]
    pub routes: PathBuf,

    /// Options file (.json, .yaml or .yml) with info, basePath, jsonPath, prefix
    /// and defaultResponses.
    #[clap(long, env = "ROUTEDOC_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Overrides `basePath`.
    #[clap(long)]
    pub base_path: Option<String>,

    /// Overrides the path prefix.
    #[clap(long)]
    pub prefix: Option<String>,
}

impl SourceArgs {
    /// Loads the router and the effective options.
    pub fn load(&self) -> AppResult<(Router, DocOptions)> {
        if !self.routes.exists() {
            return Err(AppError::General(format!(
                "Routes file not found: {:?}",
                self.routes
            )));
        }
        let router = Router::from_path(&self.routes)?;

        let mut options = match &self.options {
            Some(path) => DocOptions::from_path(path)?,
            None => DocOptions::default(),
        };
        if let Some(base_path) = &self.base_path {
            options.base_path = base_path.clone();
        }
        if let Some(prefix) = &self.prefix {
            options.prefix = Some(prefix.clone());
        }

        Ok((router, options))
    }
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Input selection.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output path for the document.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Executes the generation.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    let (router, options) = args.source.load()?;
    tracing::info!(routes = router.routes.len(), "generating swagger document");

    let output_str = match &args.output {
        Some(out_path) => {
            let ext = out_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("json");
            match ext {
                "yaml" | "yml" => serde_yaml::to_string(&generate_document(&router, &options)?)?,
                _ => generate(&router, &options)?,
            }
        }
        None => generate(&router, &options)?,
    };

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::General(format!("Failed to create output directory: {}", e))
                })?;
            }
        }
        fs::write(out_path, output_str)
            .map_err(|e| AppError::General(format!("Failed to write output file: {}", e)))?;
        tracing::info!(path = ?out_path, "document written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ROUTES: &str = r#"
routes:
  - path: /avatars/:user
    method: POST
    validate:
      type: multipart
      multipart:
        image:
          type: any
          _meta:
            - swaggerType: file
    meta:
      swagger:
        tags: [avatars]
        summary: Upload an avatar
  - path: /internal/metrics
    method: GET
"#;

    fn source(dir: &std::path::Path) -> SourceArgs {
        let routes = dir.join("routes.yaml");
        fs::write(&routes, ROUTES).unwrap();
        SourceArgs {
            routes,
            options: None,
            base_path: None,
            prefix: None,
        }
    }

    #[test]
    fn test_generate_to_json_file() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("out/swagger.json");
        let args = GenerateArgs {
            source: SourceArgs {
                prefix: Some("/api".into()),
                ..source(dir.path())
            },
            output: Some(out_path.clone()),
        };

        execute(&args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        let param = &json["paths"]["/api/avatars/{user}"]["post"]["parameters"][0];
        assert_eq!(param["name"], "image");
        assert_eq!(param["in"], "formData");
        assert_eq!(param["type"], "file");
        assert!(json["paths"].get("/api/internal/metrics").is_none());
    }

    #[test]
    fn test_generate_to_yaml_file() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("swagger.yaml");
        let args = GenerateArgs {
            source: SourceArgs {
                base_path: Some("/v3".into()),
                ..source(dir.path())
            },
            output: Some(out_path.clone()),
        };

        execute(&args).unwrap();

        let yaml = fs::read_to_string(&out_path).unwrap();
        assert!(yaml.contains("swagger: '2.0'"));
        assert!(yaml.contains("basePath: /v3"));
        assert!(yaml.contains("summary: Upload an avatar"));
    }

    #[test]
    fn test_options_file_is_applied() {
        let dir = tempdir().unwrap();
        let options = dir.path().join("options.json");
        fs::write(&options, r#"{ "info": { "title": "Avatars", "version": "1" } }"#).unwrap();
        let args = SourceArgs {
            options: Some(options),
            ..source(dir.path())
        };

        let (router, options) = args.load().unwrap();
        assert_eq!(router.routes.len(), 2);
        assert_eq!(options.info.unwrap().title.as_deref(), Some("Avatars"));
    }

    #[test]
    fn test_missing_routes_file() {
        let dir = tempdir().unwrap();
        let args = SourceArgs {
            routes: dir.path().join("nope.yaml"),
            options: None,
            base_path: None,
            prefix: None,
        };
        match args.load() {
            Err(AppError::General(msg)) => assert!(msg.contains("Routes file not found")),
            other => panic!("Wrong result: {:?}", other.map(|_| ())),
        }
    }
}
