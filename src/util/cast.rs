//! Lenient coercion of JSON request values into document field types.
//!
//! A text field accepts numbers and booleans, a number field accepts numeric
//! strings, a boolean field accepts `"true"`/`"false"`/`1`/`0`. Objects and
//! arrays never deserialize into a [`Scalar`], so they are rejected as
//! malformed bodies.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::util::validation::parse_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

/// A list field that also accepts a single bare value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => vec![value],
        }
    }
}

impl Scalar {
    fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "string",
        }
    }

    /// Every scalar has a text form.
    pub fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }

    /// A blank string casts to no value.
    pub fn to_number(&self, path: &str) -> Result<Option<f64>, String> {
        match self {
            Scalar::Number(n) => n.as_f64().map(Some).ok_or_else(|| cast_failed("Number", self, path)),
            Scalar::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Scalar::Text(s) if s.trim().is_empty() => Ok(None),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| cast_failed("Number", self, path)),
        }
    }

    pub fn to_bool(&self, path: &str) -> Result<bool, String> {
        match self {
            Scalar::Bool(b) => Ok(*b),
            Scalar::Number(n) if n.as_f64() == Some(1.0) => Ok(true),
            Scalar::Number(n) if n.as_f64() == Some(0.0) => Ok(false),
            Scalar::Text(s) if matches!(s.as_str(), "true" | "1" | "yes") => Ok(true),
            Scalar::Text(s) if matches!(s.as_str(), "false" | "0" | "no") => Ok(false),
            _ => Err(cast_failed("Boolean", self, path)),
        }
    }

    /// Strings go through [`parse_date`]; numbers are epoch milliseconds.
    pub fn to_date(&self, path: &str) -> Result<bson::DateTime, String> {
        let parsed = match self {
            Scalar::Text(s) => parse_date(s).map(bson::DateTime::from_chrono),
            Scalar::Number(n) => n.as_i64().map(bson::DateTime::from_millis),
            Scalar::Bool(_) => None,
        };
        parsed.ok_or_else(|| cast_failed("date", self, path))
    }

    pub fn to_object_id(&self, path: &str) -> Result<ObjectId, String> {
        match self {
            Scalar::Text(s) => ObjectId::parse_str(s).map_err(|_| cast_failed("ObjectId", self, path)),
            _ => Err(cast_failed("ObjectId", self, path)),
        }
    }
}

/// `Cast to <kind> failed for value "<v>" (type <t>) at path "<path>"`.
/// Only string values are quoted.
pub fn cast_failed(kind: &str, value: &Scalar, path: &str) -> String {
    let shown = match value {
        Scalar::Text(s) => format!("\"{}\"", s),
        other => other.clone().into_text(),
    };
    format!(
        "Cast to {} failed for value {} (type {}) at path \"{}\"",
        kind,
        shown,
        value.type_name(),
        path
    )
}
