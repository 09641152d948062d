//! Exhaustive validation of a merged document against the schema.

use super::schema::{Schema, platform_schema};
use crate::{ConfigPath, ValidationError, ValidationErrors, ViolationKind};
use log::debug;
use serde_json::Value;

/// Checks a document against a schema and reports every violation.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    schema: &'static Schema,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(platform_schema())
    }
}

impl Validator {
    pub fn new(schema: &'static Schema) -> Self {
        Self { schema }
    }

    /// Collect every violation in document order, unsorted.
    pub fn iter_errors(&self, document: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_node(self.schema, document, &ConfigPath::root(), &mut errors);
        errors
    }

    /// Validate a document, returning the sorted violations on failure.
    pub fn validate(&self, document: &Value) -> Result<(), ValidationErrors> {
        let errors = self.iter_errors(document);
        if errors.is_empty() {
            return Ok(());
        }
        debug!("schema validation failed (violations={})", errors.len());
        Err(ValidationErrors::new(errors))
    }
}

/// Validate one node; children of a mistyped node are not visited.
fn check_node(
    schema: &Schema,
    value: &Value,
    path: &ConfigPath,
    errors: &mut Vec<ValidationError>,
) {
    let kind = schema.kind();
    if !kind.matches(value) {
        let property = property_label(path);
        let message = format!("'{property}' is not of type '{}'", kind.name());
        errors.push(ValidationError::new(
            path.clone(),
            property,
            ViolationKind::TypeMismatch,
            message,
        ));
        return;
    }

    match value {
        Value::String(text) => check_allowed(schema, text, path, errors),
        Value::Object(map) => {
            for key in schema.required_keys() {
                if !map.contains_key(*key) {
                    errors.push(ValidationError::new(
                        path.key(*key),
                        *key,
                        ViolationKind::MissingRequired,
                        format!("'{key}' is a required property"),
                    ));
                }
            }
            for (name, child) in schema.properties() {
                if let Some(child_value) = map.get(name) {
                    check_node(child, child_value, &path.key(name), errors);
                }
            }
        }
        Value::Array(entries) => {
            if let Some(items) = schema.items() {
                for (idx, entry) in entries.iter().enumerate() {
                    check_node(items, entry, &path.index(idx), errors);
                }
            }
        }
        _ => {}
    }
}

fn check_allowed(
    schema: &Schema,
    text: &str,
    path: &ConfigPath,
    errors: &mut Vec<ValidationError>,
) {
    let allowed = schema.allowed_values();
    if allowed.is_empty() || allowed.iter().any(|value| *value == text) {
        return;
    }
    let property = property_label(path);
    let choices = allowed
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ");
    errors.push(ValidationError::new(
        path.clone(),
        property.clone(),
        ViolationKind::EnumViolation,
        format!("'{property}' is not one of [{choices}] (got '{text}')"),
    ));
}

/// Name a value by its key, or by its full path when it is an array element.
fn property_label(path: &ConfigPath) -> String {
    match path.last_key() {
        Some(key) => key.to_string(),
        None => path.to_string(),
    }
}
