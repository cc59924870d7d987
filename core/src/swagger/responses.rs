#![deny(missing_docs)]

//! # Response Extraction
//!
//! Maps a route's output declarations onto Swagger responses.

use crate::error::AppResult;
use crate::route::{OutputMap, OutputSpec};
use crate::schema::SchemaConverter;
use crate::swagger::models::{Response, Responses};
use serde_json::Value;

/// Writes one response per status code declared in `output` into `responses`.
///
/// Keys may list several codes (`"200,201"`). A range (`"200-299"`) is
/// recorded under its lower bound only; it is not expanded. Later keys
/// overwrite earlier entries for the same code.
pub fn output_to_responses(
    output: &OutputMap,
    responses: &mut Responses,
    converter: &dyn SchemaConverter,
) -> AppResult<()> {
    for (expr, spec) in output {
        let response = output_to_response(spec, converter)?;
        for code in status_codes(expr) {
            responses.insert(code, response.clone());
        }
    }
    Ok(())
}

/// Splits a status code expression into individual codes.
pub fn status_codes(expr: &str) -> Vec<String> {
    expr.split(',')
        .map(|code| code.split('-').next().unwrap_or(code).trim().to_string())
        .filter(|code| !code.is_empty())
        .collect()
}

/// Converts one output declaration.
///
/// The description is the explicit `schema` string, else the body schema's
/// own description, else `"Success"`.
pub fn output_to_response(spec: &OutputSpec, converter: &dyn SchemaConverter) -> AppResult<Response> {
    let schema = spec
        .body
        .as_ref()
        .map(|body| converter.convert(body))
        .transpose()?;

    let description = spec
        .schema
        .clone()
        .or_else(|| {
            schema
                .as_ref()
                .and_then(|s| s.get("description"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Success".to_string());

    Ok(Response {
        schema,
        description: Some(description),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SwaggerConverter};
    use serde_json::json;

    fn spec(body: Option<Schema>, schema: Option<&str>) -> OutputSpec {
        OutputSpec {
            body,
            schema: schema.map(str::to_string),
        }
    }

    #[test]
    fn test_range_uses_lower_bound() {
        let mut output = OutputMap::new();
        output.insert("200-299".into(), spec(Some(Schema::string()), None));
        let mut responses = Responses::new();
        output_to_responses(&output, &mut responses, &SwaggerConverter).unwrap();

        assert_eq!(responses.keys().collect::<Vec<_>>(), vec!["200"]);
        assert_eq!(responses["200"].schema, Some(json!({ "type": "string" })));
    }

    #[test]
    fn test_code_lists_and_ranges() {
        assert_eq!(status_codes("200, 206,300"), vec!["200", "206", "300"]);
        assert_eq!(status_codes("400-499,500"), vec!["400", "500"]);
    }

    #[test]
    fn test_description_precedence() {
        let explicit = output_to_response(
            &spec(Some(Schema::string().description("From body")), Some("Explicit")),
            &SwaggerConverter,
        )
        .unwrap();
        assert_eq!(explicit.description.as_deref(), Some("Explicit"));

        let from_body = output_to_response(
            &spec(Some(Schema::string().description("From body")), None),
            &SwaggerConverter,
        )
        .unwrap();
        assert_eq!(from_body.description.as_deref(), Some("From body"));

        let fallback = output_to_response(&spec(None, None), &SwaggerConverter).unwrap();
        assert_eq!(fallback.description.as_deref(), Some("Success"));
        assert!(fallback.schema.is_none());
    }

    #[test]
    fn test_later_keys_overwrite() {
        let mut output = OutputMap::new();
        output.insert("200".into(), spec(None, Some("first")));
        output.insert("200-299".into(), spec(None, Some("second")));
        let mut responses = Responses::new();
        responses.insert("200".into(), Response::described("default"));
        output_to_responses(&output, &mut responses, &SwaggerConverter).unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(responses["200"].description.as_deref(), Some("second"));
    }
}
