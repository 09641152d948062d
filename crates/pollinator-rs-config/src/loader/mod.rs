//! Merge-then-validate pipeline for platform configs.
//!
//! Loads the default and user documents, merges the user document over the
//! defaults, fills in AWS credentials from the local system when requested,
//! validates the result and hands out a [`PlatformConfig`].

mod layer_io;
mod merge;
mod schema;
mod utils;
mod validate;


pub use merge::merge_documents;
pub use schema::{Schema, SchemaKind, platform_schema};
pub use validate::Validator;

use crate::{
    AwsConfigCredentials, ConfigError, CredentialSource, PlatformConfig, ValidationError,
    ValidationErrors, resolve_credentials,
};
use log::{debug, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Options controlling where config documents and credentials come from.
#[derive(Debug, Clone)]
pub struct ConfigLoadOptions {
    /// User config document.
    pub user_config_path: PathBuf,
    /// Default config document; `None` uses the defaults bundled with the
    /// crate.
    pub default_config_path: Option<PathBuf>,
    /// AWS profile for the shared credentials file fallback.
    pub aws_profile: Option<String>,
}

impl ConfigLoadOptions {
    /// Create options for a user config with the process-wide default config:
    /// `POLLINATOR_DEFAULT_CONFIG`, then `~/.pollinator/default_config.json` if
    /// it exists, then the bundled defaults.
    pub fn new(user_config_path: impl AsRef<Path>) -> Self {
        Self {
            user_config_path: user_config_path.as_ref().to_path_buf(),
            default_config_path: utils::default_config_path(),
            aws_profile: None,
        }
    }

    pub fn with_default_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.default_config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_aws_profile(mut self, profile: impl Into<String>) -> Self {
        self.aws_profile = Some(profile.into());
        self
    }
}

/// One run of the pipeline over one merged document.
///
/// Build a fresh parser per run; validation state is never shared.
#[derive(Debug, Clone)]
pub struct ConfigParser {
    document: Value,
    is_validated: bool,
    errors: Vec<ValidationError>,
}

impl ConfigParser {
    /// Merge a user document over a default document.
    pub fn new(default: &Value, user: &Value) -> Self {
        Self {
            document: merge_documents(default, user),
            is_validated: false,
            errors: Vec::new(),
        }
    }

    /// Parse both documents from strings and merge them.
    pub fn from_strs(default: &str, user: &str) -> Result<Self, ConfigError> {
        debug!(
            "loading config from raw contents (default_len={}, user_len={})",
            default.len(),
            user.len()
        );
        let default = layer_io::parse_document(default, "default")?;
        let user = layer_io::parse_document(user, "user")?;
        Ok(Self::new(&default, &user))
    }

    /// Read both documents from disk and merge them.
    pub fn from_options(options: &ConfigLoadOptions) -> Result<Self, ConfigError> {
        let user = layer_io::read_document(&options.user_config_path, "user")?;
        let default = match options.default_config_path.as_deref() {
            Some(path) => layer_io::read_document(path, "default")?,
            None => bundled_default_document()?,
        };
        Ok(Self::new(&default, &user))
    }

    /// The merged document as it currently stands.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Fill in `aws` from `source` when the document requests it.
    pub fn resolve_credentials(self, source: &dyn CredentialSource) -> Result<Self, ConfigError> {
        let document = resolve_credentials(self.document, source)?;
        Ok(Self {
            document,
            is_validated: false,
            errors: Vec::new(),
        })
    }

    /// Validate the merged document, recording every violation.
    ///
    /// The parser counts as validated afterwards whether or not it passed.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let result = Validator::default().validate(&self.document);
        self.is_validated = true;
        match result {
            Ok(()) => {
                self.errors.clear();
                Ok(())
            }
            Err(errors) => {
                warn!("config failed validation (violations={})", errors.len());
                self.errors = errors.as_slice().to_vec();
                Err(ConfigError::Validation(errors))
            }
        }
    }

    pub fn is_validated(&self) -> bool {
        self.is_validated
    }

    /// Violations from the last validation, in report order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Each offending property with its path from the root.
    pub fn invalid_params(&self) -> Vec<(String, Vec<String>)> {
        self.errors
            .iter()
            .map(|error| (error.property().to_string(), error.hierarchy()))
            .collect()
    }

    /// Finish the run, validating first if that has not happened yet.
    pub fn into_config(mut self) -> Result<PlatformConfig, ConfigError> {
        if !self.is_validated {
            self.validate()?;
        } else if !self.errors.is_empty() {
            return Err(ConfigError::Validation(ValidationErrors::new(self.errors)));
        }
        Ok(PlatformConfig::new(self.document))
    }
}

/// The default config shipped with the crate.
pub fn bundled_default_document() -> Result<Value, ConfigError> {
    debug!("using bundled default config");
    layer_io::parse_document(utils::BUNDLED_DEFAULT_CONFIG, "bundled default")
}

impl PlatformConfig {
    /// Load, merge, resolve credentials and validate, looking up missing AWS
    /// credentials through the AWS SDK providers.
    pub fn load(options: &ConfigLoadOptions) -> Result<Self, ConfigError> {
        let source = AwsConfigCredentials::for_profile(options.aws_profile.as_deref());
        Self::load_with_source(options, &source)
    }

    /// Like [`PlatformConfig::load`] with an explicit credential source.
    pub fn load_with_source(
        options: &ConfigLoadOptions,
        source: &dyn CredentialSource,
    ) -> Result<Self, ConfigError> {
        info!(
            "loading platform config (user={})",
            options.user_config_path.display()
        );
        ConfigParser::from_options(options)?
            .resolve_credentials(source)?
            .into_config()
    }

    /// Run the pipeline over already-parsed documents.
    pub fn from_documents(
        default: &Value,
        user: &Value,
        source: &dyn CredentialSource,
    ) -> Result<Self, ConfigError> {
        ConfigParser::new(default, user)
            .resolve_credentials(source)?
            .into_config()
    }
}
