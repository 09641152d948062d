//! Command-line front end for validating and querying platform configs.

mod commands;

use clap::{Parser, Subcommand};
use commands::LoadArgs;
use log::info;
use pollinator_rs_config::AwsConfigCredentials;
use std::io;
use std::process::ExitCode;

/// Command-line options for the Pollinator config tool.
#[derive(Parser)]
#[command(name = "pollinator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge, resolve and validate a config, printing the result or every violation
    Validate {
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Print one property of a validated config
    Get {
        /// Property name
        name: String,
        /// Top-level section to look in (e.g. platform, airflow)
        #[arg(long)]
        locale: Option<String>,
        #[command(flatten)]
        load: LoadArgs,
    },
}

/// Entry point for the Pollinator config tool.
fn main() -> anyhow::Result<ExitCode> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    match cli.command {
        Command::Validate { load } => {
            info!("validating config (path={})", load.config.display());
            let source = AwsConfigCredentials::for_profile(load.profile.as_deref());
            commands::validate(&load, &source, &mut stdout, &mut stderr)
        }
        Command::Get { name, locale, load } => {
            info!(
                "querying config (path={}, name={}, locale={:?})",
                load.config.display(),
                name,
                locale
            );
            let source = AwsConfigCredentials::for_profile(load.profile.as_deref());
            commands::get(
                &load,
                &source,
                &name,
                locale.as_deref(),
                &mut stdout,
                &mut stderr,
            )
        }
    }
}
