//! IO helpers for reading config documents from disk.

use crate::ConfigError;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and parse a config document from disk.
pub(super) fn read_document(path: &Path, label: &str) -> Result<Value, ConfigError> {
    debug!("reading config document ({label}, path={})", path.display());
    let contents = fs::read_to_string(path)?;
    parse_document(&contents, label)
}

/// Parse a config document, requiring an object at the root.
pub(super) fn parse_document(contents: &str, label: &str) -> Result<Value, ConfigError> {
    let value: Value = json5::from_str(contents)?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject {
            label: label.to_string(),
        });
    }
    Ok(value)
}
