//! Client-facing messages for rejected documents.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use validator::ValidationErrors;

use crate::util::cast::Scalar;

/// Failures collected while building one document, rendered as
/// `<Entity> validation failed: <path>: <reason>, ...`. Paths are listed in
/// the order the document declares its fields.
#[derive(Debug)]
pub struct FieldErrors {
    entity: &'static str,
    order: &'static [&'static str],
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new(entity: &'static str, order: &'static [&'static str]) -> Self {
        FieldErrors { entity, order, errors: Vec::new() }
    }

    /// Keeps the first reason reported for a path.
    pub fn push<P: Into<String>>(&mut self, path: P, reason: String) {
        let path = path.into();
        if !self.errors.iter().any(|(p, _)| *p == path) {
            self.errors.push((path, reason));
        }
    }

    pub fn required(&mut self, path: &str) {
        self.push(path, format!("Path `{}` is required.", path));
    }

    pub fn add_validation(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            match errs.first() {
                Some(e) if e.code == "required" || e.code == "length" => self.required(&field),
                Some(e) => {
                    let reason = match &e.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Path `{}` is invalid ({}).", field, e.code),
                    };
                    self.push(field, reason);
                }
                None => {
                    let reason = format!("Path `{}` is invalid.", field);
                    self.push(field, reason);
                }
            }
        }
    }

    /// Applies `cast` to a provided value, recording the failure under `path`.
    pub fn cast<T, F>(&mut self, path: &str, value: Option<&Scalar>, cast: F) -> Option<T>
    where
        F: FnOnce(&Scalar, &str) -> Result<T, String>,
    {
        match cast(value?, path) {
            Ok(v) => Some(v),
            Err(reason) => {
                self.push(path, reason);
                None
            }
        }
    }

    pub fn into_result(mut self) -> Result<(), String> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let order = self.order;
        self.errors
            .sort_by_key(|(path, _)| order.iter().position(|p| *p == path.as_str()).unwrap_or(order.len()));
        let fields: Vec<String> = self
            .errors
            .iter()
            .map(|(path, reason)| format!("{}: {}", path, reason))
            .collect();
        Err(format!("{} validation failed: {}", self.entity, fields.join(", ")))
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_date(dt: bson::DateTime) -> String {
    dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}
