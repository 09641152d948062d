//! Error types for config loading, credential resolution and validation.

use crate::ValidationErrors;
use thiserror::Error;

/// Errors returned while loading or validating the platform config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config document failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a config document failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// A config document parsed but its root is not an object.
    #[error("invalid config document {label}: expected an object at the root")]
    NotAnObject { label: String },
    /// Converting JSON values failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// `platform.include_aws` is set, no `aws` section was given and the
    /// local credential lookup failed.
    #[error(
        "platform aws configuration error: no aws credentials found or invalid aws settings, please provide credentials ({source})"
    )]
    AwsCredentials {
        #[source]
        source: CredentialError,
    },
    /// The merged document violates the schema.
    #[error("invalid config ({} violations):\n{}", .0.len(), .0)]
    Validation(#[from] ValidationErrors),
}

/// Errors returned by a [`crate::CredentialSource`].
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The async runtime driving the AWS SDK lookup could not be started.
    #[error("failed to start credential lookup runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The lookup thread exited without reporting a result.
    #[error("credential lookup thread exited before finishing")]
    LookupAborted,
    /// The providers ran but found no usable credentials.
    #[error("no aws credentials available ({0})")]
    Unavailable(String),
    /// Every source in a chain failed.
    #[error("no credential source succeeded: {}", .attempts.join("; "))]
    Exhausted { attempts: Vec<String> },
}
