//! Field-level extraction of loosely typed JSON payloads.
//!
//! Every domain type is built through [`JsonFields`], which reads one field at
//! a time with the expected type. A missing field or a field of the wrong type
//! fails with a [`ValidationError`] naming the entity, the field, the expected
//! shape and what was observed. Fields not asked for are ignored.

use crate::error::ValidationError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Short name of the JSON shape of `value`
#[must_use]
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed, validating view over a JSON object
#[derive(Debug, Clone, Copy)]
pub struct JsonFields<'a> {
    entity: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> JsonFields<'a> {
    /// Wraps `value`, which must be a JSON object
    pub fn new(entity: &'a str, value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { entity, map }),
            other => Err(ValidationError::new(entity, "<root>", "object", shape_of(other))),
        }
    }

    /// Wraps an already extracted map
    #[must_use]
    pub fn from_map(entity: &'a str, map: &'a Map<String, Value>) -> Self {
        Self { entity, map }
    }

    /// Name of the entity being mapped
    #[must_use]
    pub fn entity(&self) -> &'a str {
        self.entity
    }

    /// True when `field` is present and not null
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        !matches!(self.map.get(field), None | Some(Value::Null))
    }

    fn error(&self, field: &str, expected: &'static str, found: &str) -> ValidationError {
        ValidationError::new(self.entity, field, expected, found)
    }

    /// Raw value of a required field; null is rejected
    pub fn value(&self, field: &str) -> Result<&'a Value, ValidationError> {
        match self.map.get(field) {
            None => Err(self.error(field, "a value", "missing")),
            Some(Value::Null) => Err(self.error(field, "a value", "null")),
            Some(value) => Ok(value),
        }
    }

    fn optional(&self, field: &str) -> Option<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn required<T>(
        &self,
        field: &str,
        expected: &'static str,
        read: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<T, ValidationError> {
        match self.map.get(field) {
            None => Err(self.error(field, expected, "missing")),
            Some(value) => read(value).ok_or_else(|| self.error(field, expected, shape_of(value))),
        }
    }

    fn maybe<T>(
        &self,
        field: &str,
        expected: &'static str,
        read: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, ValidationError> {
        match self.optional(field) {
            None => Ok(None),
            Some(value) => read(value)
                .map(Some)
                .ok_or_else(|| self.error(field, expected, shape_of(value))),
        }
    }

    /// Required string field
    pub fn str(&self, field: &str) -> Result<String, ValidationError> {
        self.required(field, "string", |v| v.as_str().map(str::to_string))
    }

    /// Optional string field
    pub fn opt_str(&self, field: &str) -> Result<Option<String>, ValidationError> {
        self.maybe(field, "string", |v| v.as_str().map(str::to_string))
    }

    /// Required identifier, given by the server either as a string or an integer
    pub fn id(&self, field: &str) -> Result<String, ValidationError> {
        self.required(field, "string or integer", id_of)
    }

    /// Optional identifier, string or integer
    pub fn opt_id(&self, field: &str) -> Result<Option<String>, ValidationError> {
        self.maybe(field, "string or integer", id_of)
    }

    /// Required number field
    pub fn f64(&self, field: &str) -> Result<f64, ValidationError> {
        self.required(field, "number", Value::as_f64)
    }

    /// Optional number field
    pub fn opt_f64(&self, field: &str) -> Result<Option<f64>, ValidationError> {
        self.maybe(field, "number", Value::as_f64)
    }

    /// Required integer field
    pub fn i64(&self, field: &str) -> Result<i64, ValidationError> {
        self.required(field, "integer", Value::as_i64)
    }

    /// Optional integer field
    pub fn opt_i64(&self, field: &str) -> Result<Option<i64>, ValidationError> {
        self.maybe(field, "integer", Value::as_i64)
    }

    /// Required boolean field
    pub fn bool(&self, field: &str) -> Result<bool, ValidationError> {
        self.required(field, "boolean", Value::as_bool)
    }

    /// Optional boolean field
    pub fn opt_bool(&self, field: &str) -> Result<Option<bool>, ValidationError> {
        self.maybe(field, "boolean", Value::as_bool)
    }

    /// Required array field
    pub fn array(&self, field: &str) -> Result<&'a Vec<Value>, ValidationError> {
        self.required(field, "array", Value::as_array)
    }

    /// Optional array field
    pub fn opt_array(&self, field: &str) -> Result<Option<&'a Vec<Value>>, ValidationError> {
        self.maybe(field, "array", Value::as_array)
    }

    /// Required nested object
    pub fn object(&self, field: &str) -> Result<&'a Map<String, Value>, ValidationError> {
        self.required(field, "object", Value::as_object)
    }

    /// Optional nested object
    pub fn opt_object(
        &self,
        field: &str,
    ) -> Result<Option<&'a Map<String, Value>>, ValidationError> {
        self.maybe(field, "object", Value::as_object)
    }

    /// Required object whose values are all numbers, e.g. `{"EUR": 12.5}`
    pub fn amounts(&self, field: &str) -> Result<BTreeMap<String, f64>, ValidationError> {
        let map = self.object(field)?;
        collect_amounts(self.entity, field, map)
    }

    /// Optional object whose values are all numbers
    pub fn opt_amounts(
        &self,
        field: &str,
    ) -> Result<Option<BTreeMap<String, f64>>, ValidationError> {
        match self.opt_object(field)? {
            None => Ok(None),
            Some(map) => collect_amounts(self.entity, field, map).map(Some),
        }
    }
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

fn collect_amounts(
    entity: &str,
    field: &str,
    map: &Map<String, Value>,
) -> Result<BTreeMap<String, f64>, ValidationError> {
    let mut amounts = BTreeMap::new();
    for (currency, value) in map {
        let amount = value.as_f64().ok_or_else(|| {
            ValidationError::new(entity, format!("{field}.{currency}"), "number", shape_of(value))
        })?;
        amounts.insert(currency.clone(), amount);
    }
    Ok(amounts)
}
