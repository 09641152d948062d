//! AWS credential fallback for configs that request AWS without supplying it.

mod aws;

pub use aws::AwsConfigCredentials;

use crate::{ConfigError, CredentialError, CredentialSet};
use log::{debug, info};
use serde_json::Value;

/// A host-local store that can supply AWS credentials.
pub trait CredentialSource {
    /// Short name used in logs and chained error reports.
    fn name(&self) -> &str;

    /// Look up credentials. Called at most once per pipeline run.
    fn credentials(&self) -> Result<CredentialSet, CredentialError>;
}

/// Whether the document asks for AWS but carries no `aws` section.
fn needs_credentials(document: &Value) -> bool {
    let include_aws = document
        .pointer("/platform/include_aws")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    include_aws && document.get("aws").is_none()
}

/// Inject local AWS credentials into a merged document when required.
///
/// The source is only consulted when `platform.include_aws` is `true` and the
/// document has no `aws` key; an existing `aws` value is never replaced.
pub fn resolve_credentials(
    document: Value,
    source: &dyn CredentialSource,
) -> Result<Value, ConfigError> {
    if !needs_credentials(&document) {
        return Ok(document);
    }
    info!(
        "no aws credentials supplied, looking for credentials on local system (source={})",
        source.name()
    );
    let credentials = source
        .credentials()
        .map_err(|source| ConfigError::AwsCredentials { source })?;
    info!("found aws credentials on local system, using them");

    let mut document = document;
    if let Value::Object(map) = &mut document {
        map.insert("aws".to_string(), serde_json::to_value(credentials)?);
    }
    Ok(document)
}

/// Tries several sources in order and returns the first success.
#[derive(Default)]
pub struct ChainCredentialSource {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl ChainCredentialSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source tried after the existing ones.
    pub fn with_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl std::fmt::Debug for ChainCredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|source| source.name()))
            .finish()
    }
}

impl CredentialSource for ChainCredentialSource {
    fn name(&self) -> &str {
        "chain"
    }

    fn credentials(&self) -> Result<CredentialSet, CredentialError> {
        let mut attempts = Vec::new();
        for source in &self.sources {
            match source.credentials() {
                Ok(credentials) => {
                    debug!("credential source succeeded (source={})", source.name());
                    return Ok(credentials);
                }
                Err(err) => {
                    debug!(
                        "credential source failed (source={}, error={})",
                        source.name(),
                        err
                    );
                    attempts.push(format!("{}: {err}", source.name()));
                }
            }
        }
        Err(CredentialError::Exhausted { attempts })
    }
}
