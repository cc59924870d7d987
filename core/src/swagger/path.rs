#![deny(missing_docs)]

//! # Path Templates
//!
//! Rewrites router path templates (`/users/:id`) into Swagger templates
//! (`/users/{id}`).

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// `:name`, an optional custom pattern in parentheses and an optional modifier.
fn named_token() -> &'static Regex {
    static NAMED_RE: OnceLock<Regex> = OnceLock::new();
    NAMED_RE.get_or_init(|| {
        Regex::new(r":(\w+)(?:\((?:[^()\\]|\\.)*\))?[?*+]?").expect("Invalid regex")
    })
}

fn capture_token() -> &'static Regex {
    static CAPTURE_RE: OnceLock<Regex> = OnceLock::new();
    CAPTURE_RE.get_or_init(|| Regex::new(r":(\w+)").expect("Invalid regex"))
}

/// Converts a router path into a Swagger path template.
///
/// Each `:name` token (custom pattern and modifier ignored) becomes `{name}`.
/// A single leading `/` is always present. Paths that are already templated
/// pass through unchanged.
///
/// Unnamed capture groups and bare wildcards have no Swagger equivalent and
/// are rejected with [`AppError::UnsupportedPath`].
pub fn swaggerize_path(path: &str) -> AppResult<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);

    let segments = trimmed
        .split('/')
        .map(|segment| {
            let rendered = named_token().replace_all(segment, "{$1}");
            if rendered.contains(['(', ')', '*']) {
                return Err(AppError::UnsupportedPath(path.to_string()));
            }
            Ok(rendered.into_owned())
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(format!("/{}", segments.join("/")))
}

/// Names of the `:name` tokens of a raw router path, in order of appearance.
pub fn path_captures(path: &str) -> Vec<String> {
    capture_token()
        .captures_iter(path)
        .map(|c| c[1].to_string())
        .collect()
}

/// Prepends `prefix` to a normalized path with exactly one `/` between them,
/// unless one side already supplies it.
pub fn join_prefix(prefix: &str, path: &str) -> String {
    if prefix.ends_with('/') || path.starts_with('/') {
        format!("{}{}", prefix, path)
    } else {
        format!("{}/{}", prefix, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swaggerize_simple_params() {
        assert_eq!(
            swaggerize_path("/users/:id/friends/:fid").unwrap(),
            "/users/{id}/friends/{fid}"
        );
    }

    #[test]
    fn test_swaggerize_is_idempotent() {
        let once = swaggerize_path("/users/:id/friends/:fid").unwrap();
        assert_eq!(swaggerize_path(&once).unwrap(), once);
        assert_eq!(swaggerize_path("/").unwrap(), "/");
        assert_eq!(swaggerize_path("").unwrap(), "/");
    }

    #[test]
    fn test_swaggerize_restores_leading_slash() {
        assert_eq!(swaggerize_path("health").unwrap(), "/health");
        assert_eq!(swaggerize_path("/a/b/").unwrap(), "/a/b/");
    }

    #[test]
    fn test_swaggerize_ignores_custom_pattern_and_modifier() {
        assert_eq!(
            swaggerize_path(r"/files/:id(\d+)/:version?").unwrap(),
            "/files/{id}/{version}"
        );
        assert_eq!(swaggerize_path("/docs/:rest*").unwrap(), "/docs/{rest}");
    }

    #[test]
    fn test_swaggerize_rejects_unnamed_groups() {
        assert!(matches!(
            swaggerize_path("/files/(.*)"),
            Err(AppError::UnsupportedPath(p)) if p == "/files/(.*)"
        ));
        assert!(swaggerize_path("/assets/*").is_err());
    }

    #[test]
    fn test_path_captures_in_order() {
        assert_eq!(path_captures("/a/:x/b/:y"), vec!["x", "y"]);
        assert!(path_captures("/static").is_empty());
    }

    #[test]
    fn test_join_prefix() {
        assert_eq!(join_prefix("/api", "/users"), "/api/users");
        assert_eq!(join_prefix("/api/", "users"), "/api/users");
        assert_eq!(join_prefix("/api", "users"), "/api/users");
    }
}
