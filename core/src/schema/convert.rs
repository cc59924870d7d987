#![deny(missing_docs)]

//! # Schema Conversion
//!
//! Converts validation [`Schema`] nodes into the JSON-schema fragments that
//! Swagger 2.0 parameters and responses embed.

use crate::error::{AppError, AppResult};
use crate::schema::{Schema, SchemaType};
use serde_json::{Map, Number, Value};

/// Keywords Swagger 2.0 keeps from a full JSON schema.
const JSON_SCHEMA_FIELDS: &[&str] = &[
    "type",
    "required",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "maxItems",
    "minItems",
    "uniqueItems",
    "enum",
    "multipleOf",
];

/// Trait for converting validation schemas to Swagger JSON schemas.
pub trait SchemaConverter {
    /// Converts one schema node (and its children).
    fn convert(&self, schema: &Schema) -> AppResult<Value>;
}

/// The standard implementation of `SchemaConverter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwaggerConverter;

impl SchemaConverter for SwaggerConverter {
    fn convert(&self, schema: &Schema) -> AppResult<Value> {
        convert_node(schema).map(Value::Object)
    }
}

fn convert_node(schema: &Schema) -> AppResult<Map<String, Value>> {
    if schema.keys.is_some() && schema.kind != SchemaType::Object {
        return Err(AppError::Conversion(format!(
            "'keys' is only valid on object schemas, found {:?}",
            schema.kind
        )));
    }
    if schema.items.is_some() && schema.kind != SchemaType::Array {
        return Err(AppError::Conversion(format!(
            "'items' is only valid on array schemas, found {:?}",
            schema.kind
        )));
    }

    let mut out = Map::new();

    match schema.kind {
        SchemaType::Any => {}
        SchemaType::String => {
            out.insert("type".into(), "string".into());
            insert_format(&mut out, schema.format.as_deref());
            insert_bounds(&mut out, schema, "minLength", "maxLength");
            if let Some(pattern) = &schema.pattern {
                out.insert("pattern".into(), pattern.clone().into());
            }
        }
        SchemaType::Number | SchemaType::Integer => {
            let name = if schema.kind == SchemaType::Integer {
                "integer"
            } else {
                "number"
            };
            out.insert("type".into(), name.into());
            insert_format(&mut out, schema.format.as_deref());
            insert_bounds(&mut out, schema, "minimum", "maximum");
        }
        SchemaType::Boolean => {
            out.insert("type".into(), "boolean".into());
        }
        SchemaType::Date => {
            out.insert("type".into(), "string".into());
            insert_format(&mut out, Some(schema.format.as_deref().unwrap_or("date-time")));
        }
        SchemaType::Binary => {
            out.insert("type".into(), "string".into());
            out.insert("format".into(), "binary".into());
            insert_bounds(&mut out, schema, "minLength", "maxLength");
        }
        SchemaType::Array => {
            out.insert("type".into(), "array".into());
            let items = match &schema.items {
                Some(items) => convert_node(items)?,
                None => Map::new(),
            };
            out.insert("items".into(), Value::Object(items));
            insert_bounds(&mut out, schema, "minItems", "maxItems");
        }
        SchemaType::Object => {
            out.insert("type".into(), "object".into());
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (name, child) in schema.keys.iter().flatten() {
                if child.required {
                    required.push(Value::String(name.clone()));
                }
                properties.insert(name.clone(), Value::Object(convert_node(child)?));
            }
            out.insert("properties".into(), Value::Object(properties));
            if !required.is_empty() {
                out.insert("required".into(), Value::Array(required));
            }
        }
        SchemaType::Alternatives => {
            // Swagger 2.0 has no anyOf, the first candidate stands in for the rest.
            let first = schema.alternatives.first().ok_or_else(|| {
                AppError::Conversion("alternatives schema has no candidates".into())
            })?;
            out = convert_node(first)?;
        }
        SchemaType::Func => {
            return Err(AppError::Conversion(
                "func schemas cannot be described in Swagger 2.0".into(),
            ));
        }
    }

    if !schema.valid.is_empty() {
        out.insert("enum".into(), Value::Array(schema.valid.clone()));
    }
    if let Some(description) = &schema.description {
        out.insert("description".into(), description.clone().into());
    }
    if let Some(default) = &schema.default {
        out.insert("default".into(), default.clone());
    }
    if let Some(example) = &schema.example {
        out.insert("example".into(), example.clone());
    }

    if let Some(Value::String(swagger_type)) = schema.meta_value("swaggerType") {
        out.insert("type".into(), swagger_type.clone().into());
        out.remove("format");
    }

    Ok(out)
}

fn insert_format(out: &mut Map<String, Value>, format: Option<&str>) {
    if let Some(format) = format {
        out.insert("format".into(), format.into());
    }
}

fn insert_bounds(out: &mut Map<String, Value>, schema: &Schema, min_key: &str, max_key: &str) {
    if let Some(min) = schema.min {
        out.insert(min_key.into(), number(min));
    }
    if let Some(max) = schema.max {
        out.insert(max_key.into(), number(max));
    }
}

/// Whole numbers are emitted as integers so `min: 1` does not render as `1.0`.
fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Reduces a JSON schema to the subset of keywords Swagger 2.0 accepts.
///
/// Arrays are converted element-wise. `items` and `properties` are recursed
/// into; tuple-style `items` collapse to their first entry.
pub fn json_schema_to_swagger(json_schema: &Value) -> Value {
    if let Value::Array(list) = json_schema {
        return Value::Array(list.iter().map(json_schema_to_swagger).collect());
    }

    let Value::Object(source) = json_schema else {
        return Value::Object(Map::new());
    };

    let mut schema: Map<String, Value> = JSON_SCHEMA_FIELDS
        .iter()
        .filter_map(|field| source.get(*field).map(|v| (field.to_string(), v.clone())))
        .collect();

    if let Some(items) = source.get("items") {
        let items = match items {
            Value::Array(list) => list.first().cloned().unwrap_or(Value::Null),
            other => other.clone(),
        };
        schema.insert("items".into(), json_schema_to_swagger(&items));
    }

    if let Some(Value::Object(properties)) = source.get("properties") {
        let properties = properties
            .iter()
            .map(|(name, value)| (name.clone(), json_schema_to_swagger(value)))
            .collect();
        schema.insert("properties".into(), Value::Object(properties));
    }

    Value::Object(schema)
}
