//! Typed view of a validated platform config.

use serde::{Deserialize, Serialize};

/// Root config for a Pollinator platform deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollinatorConfig {
    pub platform: PlatformSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<CredentialSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<PostgresSection>,
    pub docker: DockerSection,
    pub airflow: AirflowSection,
}

/// Platform identity and feature switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSection {
    pub name: String,
    pub executor: Executor,
    #[serde(default)]
    pub include_hive: bool,
    /// Require AWS credentials, falling back to the local system when the
    /// config has no `aws` section.
    #[serde(default)]
    pub include_aws: bool,
    #[serde(default)]
    pub include_examples: bool,
}

/// Airflow executor. The class-style names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Executor {
    #[serde(rename = "local", alias = "LocalExecutor")]
    Local,
    #[serde(rename = "celery", alias = "CeleryExecutor")]
    Celery,
}

/// AWS access credentials, either from the config or the local system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSet {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// CLI output format, e.g. `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl CredentialSet {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: None,
            output: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Postgres metadata database settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostgresSection {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub db: Option<String>,
    #[serde(default)]
    pub internal_port: Option<u16>,
    #[serde(default)]
    pub external_port: Option<u16>,
}

/// Container image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerSection {
    pub image_name: String,
    #[serde(default)]
    pub load_pipfile: bool,
    #[serde(default)]
    pub load_requirements: bool,
    #[serde(default)]
    pub airflow_home: Option<String>,
    #[serde(default)]
    pub airflow_submodules: Vec<String>,
}

/// Airflow webserver, alerting and account settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirflowSection {
    pub user: String,
    #[serde(default)]
    pub webserver_port: Option<u16>,
    #[serde(default)]
    pub webserver_internal_port: Option<u16>,
    #[serde(default)]
    pub webserver_external_port: Option<u16>,
    #[serde(default)]
    pub authentication: bool,
    #[serde(default)]
    pub email: Option<EmailSettings>,
    #[serde(default)]
    pub accounts: Vec<AirflowAccount>,
}

/// SMTP settings for Airflow notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub email_address: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

/// Webserver account created at provisioning time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirflowAccount {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub role: AccountRole,
}

/// Built-in Airflow RBAC roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Admin,
    User,
    Op,
    Viewer,
    Public,
}
