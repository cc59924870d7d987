#![deny(missing_docs)]

//! # Validation Schemas
//!
//! The validation DSL a router attaches to its routes.
//!
//! A [`Schema`] describes one node (a string, an object with keys, an array of
//! items, ...) together with its flags and an ordered list of metadata
//! annotations. Schemas are usually built in code with the builder methods,
//! or deserialized from JSON/YAML route files:
//!
//! ```yaml
//! type: object
//! keys:
//!   avatar:
//!     type: any
//!     _meta:
//!       - swaggerType: file
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod convert;

pub use convert::{json_schema_to_swagger, SchemaConverter, SwaggerConverter};

/// The kind of value a schema node validates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Accepts anything.
    #[default]
    Any,
    /// A string.
    String,
    /// A floating point number.
    Number,
    /// An integer.
    Integer,
    /// A boolean.
    Boolean,
    /// A timestamp, rendered as a `date-time` string.
    Date,
    /// Raw bytes (uploaded files).
    Binary,
    /// A list of `items`.
    Array,
    /// A map of named `keys`.
    Object,
    /// One of several `alternatives`.
    Alternatives,
    /// A function value. Not expressible in Swagger.
    Func,
}

/// A single validation schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Node kind.
    #[serde(rename = "type", default)]
    pub kind: SchemaType,
    /// Whether the value must be present.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Format hint (e.g. `email`, `uuid`, `int64`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Allowed values (rendered as `enum`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid: Vec<Value>,
    /// Lower bound: value, length or item count depending on the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound: value, length or item count depending on the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression a string must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Object keys, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<IndexMap<String, Schema>>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Candidate schemas of an `alternatives` node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Schema>,
    /// Ordered metadata annotations.
    #[serde(default, alias = "_meta", skip_serializing_if = "Vec::is_empty")]
    pub metas: Vec<Map<String, Value>>,
}

impl Schema {
    /// Creates an empty schema of the given kind.
    pub fn new(kind: SchemaType) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// `any` schema.
    pub fn any() -> Self {
        Self::new(SchemaType::Any)
    }

    /// `string` schema.
    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    /// `number` schema.
    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    /// `integer` schema.
    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    /// `boolean` schema.
    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// `date` schema.
    pub fn date() -> Self {
        Self::new(SchemaType::Date)
    }

    /// `binary` schema.
    pub fn binary() -> Self {
        Self::new(SchemaType::Binary)
    }

    /// `func` schema.
    pub fn func() -> Self {
        Self::new(SchemaType::Func)
    }

    /// `array` schema with the given item schema.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// `object` schema. Keys keep the iteration order.
    pub fn object<K, I>(keys: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Self {
            keys: Some(keys.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            ..Self::new(SchemaType::Object)
        }
    }

    /// `alternatives` schema.
    pub fn alternatives(candidates: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            alternatives: candidates.into_iter().collect(),
            ..Self::new(SchemaType::Alternatives)
        }
    }

    /// Marks the value as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the format hint.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the example value.
    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Restricts the value to the given set.
    pub fn valid<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.valid = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the string pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Appends a metadata annotation. Values that are not JSON objects are ignored.
    pub fn meta(mut self, annotation: Value) -> Self {
        if let Value::Object(map) = annotation {
            self.metas.push(map);
        }
        self
    }

    /// True for `object` nodes.
    pub fn is_object(&self) -> bool {
        self.kind == SchemaType::Object
    }

    /// Looks up an annotation key. Later annotations win.
    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.metas.iter().rev().find_map(|m| m.get(key))
    }

    /// Merges `extra` keys into this object schema, `extra` winning on conflict.
    ///
    /// Only meaningful for `object` nodes; returns `false` and leaves the
    /// schema untouched otherwise.
    pub fn merge_keys(&mut self, extra: &IndexMap<String, Schema>) -> bool {
        if !self.is_object() {
            return false;
        }
        let keys = self.keys.get_or_insert_with(IndexMap::new);
        for (name, schema) in extra {
            keys.insert(name.clone(), schema.clone());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_keeps_key_order() {
        let schema = Schema::object([("b", Schema::string()), ("a", Schema::number())]);
        let names: Vec<_> = schema.keys.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_meta_value_last_wins() {
        let schema = Schema::any()
            .meta(json!({ "swaggerType": "string" }))
            .meta(json!({ "swaggerType": "file" }))
            .meta(json!("ignored"));
        assert_eq!(schema.metas.len(), 2);
        assert_eq!(schema.meta_value("swaggerType"), Some(&json!("file")));
    }

    #[test]
    fn test_deserialize_with_underscore_meta() {
        let yaml = r#"
type: object
keys:
  avatar:
    type: any
    _meta:
      - swaggerType: file
  name:
    type: string
    required: true
"#;
        let schema: Schema = serde_yaml::from_str(yaml).unwrap();
        let keys = schema.keys.unwrap();
        assert_eq!(keys["avatar"].meta_value("swaggerType"), Some(&json!("file")));
        assert!(keys["name"].required);
        assert_eq!(keys["name"].kind, SchemaType::String);
    }

    #[test]
    fn test_merge_keys_extra_wins() {
        let mut query = Schema::object([("page", Schema::integer()), ("file", Schema::string())]);
        let mut extra = IndexMap::new();
        extra.insert("file".to_string(), Schema::binary());
        assert!(query.merge_keys(&extra));
        let keys = query.keys.unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys["file"].kind, SchemaType::Binary);
    }

    #[test]
    fn test_merge_keys_rejects_non_object() {
        let mut schema = Schema::string();
        assert!(!schema.merge_keys(&IndexMap::new()));
        assert!(schema.keys.is_none());
    }
}
