pub mod movie_dto;
pub mod user_dto;

use serde_json::Number;

/// Whole numbers are emitted without a fractional part.
pub fn json_number(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}
