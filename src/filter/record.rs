// SPDX-License-Identifier: MIT

//! Telemetry records backed by JSON objects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FilterError;
use crate::ottl::{Path, PathResolver, Scalar};

/// A single telemetry record (log line, span, data point)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty Record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object
    pub fn from_json(value: Value) -> Result<Self, FilterError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(FilterError::invalid_record(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse one line of JSON-lines input
    pub fn parse_line(line: &str) -> Result<Self, FilterError> {
        Self::from_json(serde_json::from_str(line)?)
    }

    /// Set a top-level field
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Get a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Follow a path: each field selects an object member, then its map key
    pub fn get_path(&self, path: &Path) -> Option<&Value> {
        let (first, rest) = path.fields.split_first()?;

        let mut current = self.fields.get(&first.name)?;
        if let Some(key) = &first.map_key {
            current = current.get(key)?;
        }
        for field in rest {
            current = current.get(&field.name)?;
            if let Some(key) = &field.map_key {
                current = current.get(key)?;
            }
        }
        Some(current)
    }

    /// Convert record to JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert a JSON value to the scalar conditions compare.
///
/// Arrays and objects are not scalars and read as nil.
pub fn to_scalar(value: &Value) -> Scalar {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => Scalar::Nil,
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => n.as_f64().map_or(Scalar::Nil, Scalar::Float),
        },
        Value::String(s) => Scalar::String(s.clone()),
    }
}

/// Resolves condition paths against a [`Record`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordPaths;

impl PathResolver<Record> for RecordPaths {
    fn resolve(&self, path: &Path, ctx: &Record) -> Scalar {
        ctx.get_path(path).map_or(Scalar::Nil, to_scalar)
    }
}
