//! Input validation for collaborator-supplied entity data
//!
//! Validation is opt-in: forms call [`Validate::validate`] before handing
//! data to a repository. The object store itself never rejects a record on
//! validation grounds.

pub mod validators;

use crate::core::error::ValidationError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Implemented by entity inputs that can check themselves
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects field errors across several validator calls
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `rule` against `value`, recording the message on failure
    pub fn check<F>(&mut self, field: &str, value: &Value, rule: F) -> &mut Self
    where
        F: Fn(&str, &Value) -> Result<(), String>,
    {
        if let Err(message) = rule(field, value) {
            self.errors.entry(field.to_string()).or_default().push(message);
        }
        self
    }

    /// Ok when every check passed
    pub fn finish(&mut self) -> Result<(), ValidationError> {
        match ValidationError::from_fields(std::mem::take(&mut self.errors)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
