#![deny(missing_docs)]

//! # Path Merging
//!
//! Folds per-route fragments into a single path table.

use crate::error::AppResult;
use crate::route::Route;
use crate::swagger::models::PathTable;
use crate::swagger::operation::{route_to_paths, PathOptions, WarnFn};

/// Merges `new_paths` into `paths`.
///
/// The first operation registered at a `(path, method)` pair wins. Later ones
/// are dropped and reported through `warn` (and the log); this never fails.
pub fn merge_paths(paths: &mut PathTable, new_paths: PathTable, warn: Option<&WarnFn>) {
    for (path, new_item) in new_paths {
        let item = paths.entry(path.clone()).or_default();

        for (method, operation) in new_item {
            if item.contains_key(&method) {
                let message = format!("{}[{}] exists in multiple routes", path, method);
                tracing::warn!("{}", message);
                if let Some(warn) = warn {
                    warn(&message);
                }
                continue;
            }
            item.insert(method, operation);
        }
    }
}

/// Translates and merges every route, in order.
pub fn routes_to_paths<'a>(
    routes: impl IntoIterator<Item = &'a Route>,
    options: &PathOptions,
) -> AppResult<PathTable> {
    let mut paths = PathTable::new();
    for route in routes {
        merge_paths(&mut paths, route_to_paths(route, options)?, options.warn.as_ref());
    }
    Ok(paths)
}
