//! Read-only access to a validated platform config.

use crate::{ConfigError, PollinatorConfig};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A merged config document that passed schema validation.
///
/// Lookups never fail: a missing section or key is reported as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    document: Value,
    locale: Option<String>,
}

impl PlatformConfig {
    pub(crate) fn new(document: Value) -> Self {
        Self {
            document,
            locale: None,
        }
    }

    /// Set the section used when a lookup names no locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Look up `name` inside the `locale` section, or at the root when no
    /// locale is given and none was set with [`PlatformConfig::with_locale`].
    pub fn get(&self, name: &str, locale: Option<&str>) -> Option<&Value> {
        let scope = match locale.or(self.locale.as_deref()) {
            Some(section) => self.section(section)?,
            None => self.document.as_object()?,
        };
        scope.get(name)
    }

    pub fn get_str(&self, name: &str, locale: Option<&str>) -> Option<&str> {
        self.get(name, locale).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str, locale: Option<&str>) -> Option<bool> {
        self.get(name, locale).and_then(Value::as_bool)
    }

    /// An unsigned integer. Whole floats such as `5433.0` are accepted.
    pub fn get_u64(&self, name: &str, locale: Option<&str>) -> Option<u64> {
        let value = self.get(name, locale)?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|number| {
                    number.fract() == 0.0 && *number >= 0.0 && *number <= u64::MAX as f64
                })
                .map(|number| number as u64)
        })
    }

    pub fn get_f64(&self, name: &str, locale: Option<&str>) -> Option<f64> {
        self.get(name, locale).and_then(Value::as_f64)
    }

    /// A top-level section, if present and an object.
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.document.get(name).and_then(Value::as_object)
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    /// Decode into the typed model.
    pub fn typed(&self) -> Result<PollinatorConfig, ConfigError> {
        Ok(PollinatorConfig::deserialize(&self.document)?)
    }
}
