#![deny(missing_docs)]

//! # Document Builder
//!
//! Collects routes from one or more routers and assembles a document.

use crate::error::AppResult;
use crate::route::{Route, Router};
use crate::swagger::merge::merge_paths;
use crate::swagger::models::SwaggerDocument;
use crate::swagger::operation::{translate, PathOptions};

/// Accumulates routes, each remembered with the prefix of the router it came from.
#[derive(Debug, Clone, Default)]
pub struct SwaggerApi {
    routes: Vec<(Route, Option<String>)>,
}

impl SwaggerApi {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one route. A `prefix` here takes precedence over [`PathOptions::prefix`].
    pub fn add_route(&mut self, route: Route, prefix: Option<&str>) {
        self.routes.push((route, prefix.map(str::to_string)));
    }

    /// Adds every route of `router`, in order.
    pub fn add_router(&mut self, router: &Router, prefix: Option<&str>) {
        for route in &router.routes {
            self.add_route(route.clone(), prefix);
        }
    }

    /// Routes collected so far with their prefix.
    pub fn routes(&self) -> impl Iterator<Item = (&Route, Option<&str>)> {
        self.routes.iter().map(|(r, p)| (r, p.as_deref()))
    }

    /// Builds the document: `base` with every route merged into its paths.
    ///
    /// Paths already present in `base` take precedence over generated ones.
    pub fn generate_spec(
        &self,
        base: SwaggerDocument,
        options: &PathOptions,
    ) -> AppResult<SwaggerDocument> {
        let mut document = base;

        for (route, prefix) in self.routes() {
            let prefix = prefix.or(options.prefix.as_deref());
            let fragment = translate(route, options, prefix)?;
            merge_paths(&mut document.paths, fragment, options.warn.as_ref());
        }

        tracing::debug!(paths = document.paths.len(), "generated swagger document");
        Ok(document)
    }
}
