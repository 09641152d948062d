//! Subcommand implementations and report rendering.

use clap::Args;
use pollinator_rs_config::{ConfigError, ConfigLoadOptions, CredentialSource, PlatformConfig};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Where to read documents and credentials from.
#[derive(Args, Debug, Clone)]
pub(crate) struct LoadArgs {
    /// Path to the user config JSON
    #[arg(long, short = 'c')]
    pub(crate) config: PathBuf,
    /// Path to the default config JSON (defaults to $POLLINATOR_DEFAULT_CONFIG,
    /// then ~/.pollinator/default_config.json, then the bundled defaults)
    #[arg(long)]
    pub(crate) defaults: Option<PathBuf>,
    /// AWS profile used when credentials fall back to ~/.aws
    #[arg(long)]
    pub(crate) profile: Option<String>,
}

impl LoadArgs {
    fn options(&self) -> ConfigLoadOptions {
        let mut options = ConfigLoadOptions::new(&self.config);
        if let Some(defaults) = &self.defaults {
            options = options.with_default_config_path(defaults);
        }
        if let Some(profile) = &self.profile {
            options = options.with_aws_profile(profile.clone());
        }
        options
    }
}

/// Run the pipeline. `Ok(None)` means a reportable failure was written to `err`.
fn load(
    args: &LoadArgs,
    source: &dyn CredentialSource,
    err: &mut dyn Write,
) -> anyhow::Result<Option<PlatformConfig>> {
    match PlatformConfig::load_with_source(&args.options(), source) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::Validation(errors)) => {
            writeln!(err, "config is invalid ({} violations):", errors.len())?;
            for error in &errors {
                writeln!(err, "  {error}")?;
            }
            Ok(None)
        }
        Err(aws @ ConfigError::AwsCredentials { .. }) => {
            writeln!(err, "{aws}")?;
            Ok(None)
        }
        Err(other) => Err(anyhow::Error::new(other).context(format!(
            "failed to load config from {}",
            args.config.display()
        ))),
    }
}

pub(crate) fn validate(
    args: &LoadArgs,
    source: &dyn CredentialSource,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let Some(config) = load(args, source, err)? else {
        return Ok(ExitCode::FAILURE);
    };
    let rendered = serde_json::to_string_pretty(config.as_value())?;
    writeln!(out, "{rendered}")?;
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn get(
    args: &LoadArgs,
    source: &dyn CredentialSource,
    name: &str,
    locale: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let Some(config) = load(args, source, err)? else {
        return Ok(ExitCode::FAILURE);
    };
    match config.get(name, locale) {
        Some(Value::String(text)) => writeln!(out, "{text}")?,
        Some(value) => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        None => {
            match locale {
                Some(section) => writeln!(err, "'{name}' not found in '{section}'")?,
                None => writeln!(err, "'{name}' not found")?,
            }
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
