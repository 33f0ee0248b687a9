//! Reusable field validators
//!
//! Each validator takes the field name and its JSON value and returns a
//! human-readable message on failure. Validators only judge the value kinds
//! they understand and let anything else through.

use crate::core::field::FieldFormat;
use serde_json::Value;

/// Validator: string must contain something other than whitespace
pub fn non_empty() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("'{}' is required", field)),
        Value::String(s) if s.trim().is_empty() => Err(format!("'{}' must not be empty", field)),
        _ => Ok(()),
    }
}

/// Validator: number must be zero or greater
pub fn non_negative() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(format!(
            "'{}' must not be negative (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: string must match a field format (absent values pass)
pub fn format(
    format: FieldFormat,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if !format.matches(s) => Err(format!(
            "'{}' is not a valid {} (value: {})",
            field,
            match format {
                FieldFormat::Email => "email address",
                FieldFormat::Url => "url",
            },
            s
        )),
        _ => Ok(()),
    }
}
