#![deny(missing_docs)]

//! # Parameter Extraction
//!
//! Flattens a route's per-location validation schemas into Swagger parameters.

use crate::error::AppResult;
use crate::route::ValidateSpec;
use crate::schema::{Schema, SchemaConverter};
use crate::swagger::models::{ParamLocation, Parameter};
use serde_json::Value;

/// Converts a route's validation schemas into an ordered parameter list.
///
/// Locations are visited as header, query, path, params, formData, body.
/// `path` and `params` both land `in: path`. Every property of an object
/// schema becomes one parameter; non-object schemas contribute nothing.
/// The body schema is kept whole as a single `body` parameter.
pub fn validate_to_parameters(
    validate: &ValidateSpec,
    converter: &dyn SchemaConverter,
) -> AppResult<Vec<Parameter>> {
    let mut parameters = Vec::new();

    let locations = [
        (&validate.header, ParamLocation::Header),
        (&validate.query, ParamLocation::Query),
        (&validate.path, ParamLocation::Path),
        (&validate.params, ParamLocation::Path),
        (&validate.form_data, ParamLocation::FormData),
    ];

    for (schema, location) in locations {
        if let Some(schema) = schema {
            add_schema_parameters(&mut parameters, location, schema, converter)?;
        }
    }

    if let Some(body) = &validate.body {
        parameters.push(Parameter::body(converter.convert(body)?));
    }

    Ok(parameters)
}

fn add_schema_parameters(
    parameters: &mut Vec<Parameter>,
    location: ParamLocation,
    schema: &Schema,
    converter: &dyn SchemaConverter,
) -> AppResult<()> {
    let converted = converter.convert(schema)?;

    if converted.get("type").and_then(Value::as_str) != Some("object") {
        return Ok(());
    }
    let Some(Value::Object(properties)) = converted.get("properties") else {
        return Ok(());
    };

    let required: Vec<&str> = converted
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for (name, property) in properties {
        let property = property.as_object().cloned().unwrap_or_default();
        parameters.push(Parameter::from_property(
            name.clone(),
            location,
            property,
            required.contains(&name.as_str()),
        ));
    }

    Ok(())
}
