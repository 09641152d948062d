//! Platform configuration loading, merging and validation.
//!
//! This crate owns the Pollinator config schema, the default/user merge, the
//! AWS credential fallback and the exhaustive validator used by the CLI.

mod credentials;
mod document;
mod error;
mod loader;
mod model;
mod violation;

/// Credential sources used when the config asks for AWS but supplies none.
pub use credentials::{
    AwsConfigCredentials, ChainCredentialSource, CredentialSource, resolve_credentials,
};
/// Read-only accessor over a validated config.
pub use document::PlatformConfig;
/// Public error types returned by loading, credential and validation APIs.
pub use error::{ConfigError, CredentialError};
/// Pipeline stages and options.
pub use loader::{
    ConfigLoadOptions, ConfigParser, Schema, SchemaKind, Validator, bundled_default_document,
    merge_documents, platform_schema,
};
/// Typed config model.
pub use model::*;
/// Structured validation violations.
pub use violation::{ConfigPath, PathSegment, ValidationError, ValidationErrors, ViolationKind};
