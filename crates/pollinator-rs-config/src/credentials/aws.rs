//! Credential lookup through the AWS SDK's environment and profile providers.

use super::CredentialSource;
use crate::{CredentialError, CredentialSet};
use aws_config::environment::{
    EnvironmentVariableCredentialsProvider, EnvironmentVariableRegionProvider,
};
use aws_config::meta::credentials::CredentialsProviderChain;
use aws_config::meta::region::{ProvideRegion, RegionProviderChain};
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::{ProfileFileCredentialsProvider, ProfileFileRegionProvider};
use aws_credential_types::provider::ProvideCredentials;
use log::debug;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tokio::runtime::{Builder, Handle, Runtime};

/// Credentials from the `AWS_*` environment variables, then the shared
/// `~/.aws/credentials` and `~/.aws/config` profile files.
///
/// Profile selection, file locations and the region follow the AWS SDK's
/// own rules (`AWS_PROFILE`, `AWS_SHARED_CREDENTIALS_FILE`, `AWS_CONFIG_FILE`,
/// `AWS_REGION`).
#[derive(Debug, Clone)]
pub struct AwsConfigCredentials {
    profile: Option<String>,
    credentials_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    use_environment: bool,
}

impl Default for AwsConfigCredentials {
    fn default() -> Self {
        Self {
            profile: None,
            credentials_file: None,
            config_file: None,
            use_environment: true,
        }
    }
}

impl AwsConfigCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the named profile, or the SDK's default selection when `None`.
    pub fn for_profile(profile: Option<&str>) -> Self {
        match profile {
            Some(profile) => Self::new().with_profile(profile),
            None => Self::new(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Read these profile files instead of the SDK's default locations.
    pub fn with_profile_files(
        mut self,
        credentials_file: impl AsRef<Path>,
        config_file: impl AsRef<Path>,
    ) -> Self {
        self.credentials_file = Some(credentials_file.as_ref().to_path_buf());
        self.config_file = Some(config_file.as_ref().to_path_buf());
        self
    }

    /// Skip the environment variables and consult only the profile files.
    pub fn without_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    fn profile_files(&self) -> Option<ProfileFiles> {
        if self.credentials_file.is_none() && self.config_file.is_none() {
            return None;
        }
        let mut builder = ProfileFiles::builder();
        if let Some(path) = &self.credentials_file {
            builder = builder.with_file(ProfileFileKind::Credentials, path);
        }
        if let Some(path) = &self.config_file {
            builder = builder.with_file(ProfileFileKind::Config, path);
        }
        Some(builder.build())
    }

    async fn lookup(self) -> Result<CredentialSet, CredentialError> {
        let files = self.profile_files();

        let mut credentials_builder = ProfileFileCredentialsProvider::builder();
        let mut region_builder = ProfileFileRegionProvider::builder();
        if let Some(profile) = &self.profile {
            credentials_builder = credentials_builder.profile_name(profile);
            region_builder = region_builder.profile_name(profile);
        }
        if let Some(files) = files {
            credentials_builder = credentials_builder.profile_files(files.clone());
            region_builder = region_builder.profile_files(files);
        }
        let profile_credentials = credentials_builder.build();
        let profile_region = region_builder.build();

        let (credentials, region) = if self.use_environment {
            let chain = CredentialsProviderChain::first_try(
                "Environment",
                EnvironmentVariableCredentialsProvider::new(),
            )
            .or_else("Profile", profile_credentials);
            let credentials = ProvideCredentials::provide_credentials(&chain).await;
            let region = RegionProviderChain::first_try(EnvironmentVariableRegionProvider::new())
                .or_else(profile_region)
                .region()
                .await;
            (credentials, region)
        } else {
            (
                ProvideCredentials::provide_credentials(&profile_credentials).await,
                ProvideRegion::region(&profile_region).await,
            )
        };

        let credentials =
            credentials.map_err(|err| CredentialError::Unavailable(err.to_string()))?;
        let mut set = CredentialSet::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
        );
        set.region = region.map(|region| region.to_string());
        Ok(set)
    }
}

impl CredentialSource for AwsConfigCredentials {
    fn name(&self) -> &str {
        "aws-config"
    }

    fn credentials(&self) -> Result<CredentialSet, CredentialError> {
        debug!(
            "resolving aws credentials (profile={:?}, environment={})",
            self.profile, self.use_environment
        );
        block_on(self.clone().lookup())
    }
}

fn current_thread_runtime() -> Result<Runtime, CredentialError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CredentialError::Runtime)
}

/// Drive a lookup to completion from synchronous code.
///
/// Inside an existing runtime the lookup runs on its own thread, since a
/// runtime cannot be started or blocked on from within another.
fn block_on<F, T>(future: F) -> Result<T, CredentialError>
where
    F: Future<Output = Result<T, CredentialError>> + Send + 'static,
    T: Send + 'static,
{
    if Handle::try_current().is_ok() {
        let (tx, rx) = mpsc::sync_channel(1);
        std::thread::spawn(move || {
            let result = current_thread_runtime().and_then(|runtime| runtime.block_on(future));
            let _ = tx.send(result);
        });
        return rx.recv().unwrap_or(Err(CredentialError::LookupAborted));
    }
    current_thread_runtime()?.block_on(future)
}
