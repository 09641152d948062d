//! Declarative schema for the Pollinator platform config.
//!
//! Section schemas are built once and the root schema references them; no
//! node is duplicated.

use serde_json::Value;
use std::sync::LazyLock;

/// Accepted JSON shape of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

impl SchemaKind {
    /// Name used in violation messages.
    pub fn name(self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
        }
    }

    /// Whether a value has this shape. Any JSON number is a `Number`.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            SchemaKind::Object => value.is_object(),
            SchemaKind::Array => value.is_array(),
            SchemaKind::String => value.is_string(),
            SchemaKind::Number => value.is_number(),
            SchemaKind::Boolean => value.is_boolean(),
        }
    }
}

/// One node of the schema tree.
#[derive(Debug)]
pub struct Schema {
    kind: SchemaKind,
    required: &'static [&'static str],
    allowed: &'static [&'static str],
    properties: Vec<(&'static str, &'static Schema)>,
    items: Option<&'static Schema>,
}

impl Schema {
    const fn leaf(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: &[],
            allowed: &[],
            properties: Vec::new(),
            items: None,
        }
    }

    fn object() -> Self {
        Self::leaf(SchemaKind::Object)
    }

    fn array(items: &'static Schema) -> Self {
        Self {
            items: Some(items),
            ..Self::leaf(SchemaKind::Array)
        }
    }

    fn string_enum(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed,
            ..Self::leaf(SchemaKind::String)
        }
    }

    fn required(mut self, keys: &'static [&'static str]) -> Self {
        self.required = keys;
        self
    }

    fn property(mut self, name: &'static str, schema: &'static Schema) -> Self {
        self.properties.push((name, schema));
        self
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Keys that must be present when this node is an object.
    pub fn required_keys(&self) -> &'static [&'static str] {
        self.required
    }

    /// Allowed values for a restricted string; empty when unrestricted.
    pub fn allowed_values(&self) -> &'static [&'static str] {
        self.allowed
    }

    /// Declared child properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &'static Schema)> + '_ {
        self.properties.iter().copied()
    }

    pub fn property_schema(&self, name: &str) -> Option<&'static Schema> {
        self.properties
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, schema)| *schema)
    }

    /// Item schema when this node is an array.
    pub fn items(&self) -> Option<&'static Schema> {
        self.items
    }
}

static STRING: Schema = Schema::leaf(SchemaKind::String);
static NUMBER: Schema = Schema::leaf(SchemaKind::Number);
static BOOLEAN: Schema = Schema::leaf(SchemaKind::Boolean);

/// Executor names, including the legacy class-style aliases.
pub(crate) const EXECUTORS: &[&str] = &["local", "celery", "LocalExecutor", "CeleryExecutor"];
/// Roles an Airflow account may be granted.
pub(crate) const ACCOUNT_ROLES: &[&str] = &["Admin", "User", "Op", "Viewer", "Public"];

static EXECUTOR: LazyLock<Schema> = LazyLock::new(|| Schema::string_enum(EXECUTORS));
static ACCOUNT_ROLE: LazyLock<Schema> = LazyLock::new(|| Schema::string_enum(ACCOUNT_ROLES));
static STRING_LIST: LazyLock<Schema> = LazyLock::new(|| Schema::array(&STRING));

static PLATFORM: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&["name", "executor"])
        .property("name", &STRING)
        .property("executor", &EXECUTOR)
        .property("include_hive", &BOOLEAN)
        .property("include_aws", &BOOLEAN)
        .property("include_examples", &BOOLEAN)
});

static AWS: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&["access_key_id", "secret_access_key"])
        .property("access_key_id", &STRING)
        .property("secret_access_key", &STRING)
        .property("region", &STRING)
        .property("output", &STRING)
});

static POSTGRES: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .property("user", &STRING)
        .property("password", &STRING)
        .property("db", &STRING)
        .property("internal_port", &NUMBER)
        .property("external_port", &NUMBER)
});

static DOCKER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&["image_name"])
        .property("image_name", &STRING)
        .property("load_pipfile", &BOOLEAN)
        .property("load_requirements", &BOOLEAN)
        .property("airflow_home", &STRING)
        .property("airflow_submodules", &STRING_LIST)
});

static AIRFLOW_EMAIL: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&["email_address", "password", "smtp_host", "smtp_port"])
        .property("email_address", &STRING)
        .property("password", &STRING)
        .property("smtp_host", &STRING)
        .property("smtp_port", &NUMBER)
});

static AIRFLOW_ACCOUNT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&[
            "firstname",
            "lastname",
            "email",
            "password",
            "role",
            "username",
        ])
        .property("username", &STRING)
        .property("firstname", &STRING)
        .property("lastname", &STRING)
        .property("email", &STRING)
        .property("password", &STRING)
        .property("role", &ACCOUNT_ROLE)
});

static AIRFLOW_ACCOUNTS: LazyLock<Schema> = LazyLock::new(|| Schema::array(&AIRFLOW_ACCOUNT));

static AIRFLOW: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&["user"])
        .property("user", &STRING)
        .property("webserver_port", &NUMBER)
        .property("webserver_internal_port", &NUMBER)
        .property("webserver_external_port", &NUMBER)
        .property("authentication", &BOOLEAN)
        .property("email", &AIRFLOW_EMAIL)
        .property("accounts", &AIRFLOW_ACCOUNTS)
});

static ROOT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object()
        .required(&["platform", "airflow", "docker"])
        .property("platform", &PLATFORM)
        .property("aws", &AWS)
        .property("postgres", &POSTGRES)
        .property("docker", &DOCKER)
        .property("airflow", &AIRFLOW)
});

/// Root schema every merged platform config must satisfy.
pub fn platform_schema() -> &'static Schema {
    &ROOT
}
