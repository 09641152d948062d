//! End-to-end tests for loading, merging, credential fallback and validation.

use pollinator_rs_config::{
    AccountRole, ConfigError, ConfigLoadOptions, ConfigParser, CredentialSet, Executor,
    PlatformConfig, Validator, ViolationKind, merge_documents,
};
use pollinator_rs_test_utils::{
    FailingCredentials, RecordingCredentials, StaticCredentials, default_document,
    full_user_document, write_document,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

fn validation_errors(err: ConfigError) -> pollinator_rs_config::ValidationErrors {
    match err {
        ConfigError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other}"),
    }
}

/// Defaults fill in everything the user omits.
#[test]
fn user_name_over_defaults_validates() {
    let source = RecordingCredentials::new(FailingCredentials);
    let config = PlatformConfig::from_documents(
        &default_document(),
        &json!({ "platform": { "name": "demo" } }),
        &source,
    )
    .expect("config");

    assert_eq!(config.get("name", Some("platform")), Some(&json!("demo")));
    assert_eq!(config.get("executor", Some("platform")), Some(&json!("local")));
    assert_eq!(source.calls(), 0);
}

/// Every leaf present in both documents takes the user's value.
#[test]
fn merge_preserves_user_overrides() {
    let user = full_user_document();
    let default = json!({
        "platform": { "name": "base", "executor": "local", "include_aws": false },
        "docker": { "image_name": "base", "airflow_submodules": ["base"] },
        "airflow": { "user": "base", "webserver_port": 1 },
        "extra": { "kept": true }
    });
    let merged = merge_documents(&default, &user);

    for pointer in [
        "/platform/name",
        "/platform/executor",
        "/platform/include_aws",
        "/docker/image_name",
        "/docker/airflow_submodules",
        "/airflow/user",
        "/airflow/webserver_port",
    ] {
        assert_eq!(merged.pointer(pointer), user.pointer(pointer), "{pointer}");
    }
    assert_eq!(merged.pointer("/extra/kept"), Some(&json!(true)));
}

/// Report a single violation for a missing image name.
#[test]
fn missing_image_name_reports_single_error() {
    let default = json!({
        "platform": { "name": "demo", "executor": "local" },
        "docker": { "load_pipfile": true },
        "airflow": { "user": "a" }
    });
    let err = PlatformConfig::from_documents(&default, &json!({}), &FailingCredentials)
        .unwrap_err();
    let errors = validation_errors(err);
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().expect("error");
    assert_eq!(error.path().last_key(), Some("image_name"));
    assert_eq!(error.kind(), ViolationKind::MissingRequired);
}

/// Report an unknown executor as an enum violation.
#[test]
fn invalid_executor_reports_enum_violation() {
    let user = json!({ "platform": { "name": "demo", "executor": "invalid" } });
    let err = PlatformConfig::from_documents(&default_document(), &user, &FailingCredentials)
        .unwrap_err();
    let errors = validation_errors(err);
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().expect("error");
    assert_eq!(error.kind(), ViolationKind::EnumViolation);
    assert_eq!(error.property(), "executor");
}

/// Raise the platform AWS error when the lookup fails.
#[test]
fn failed_lookup_is_platform_aws_error() {
    let source = RecordingCredentials::new(FailingCredentials);
    let user = json!({ "platform": { "name": "demo", "include_aws": true } });
    let err = PlatformConfig::from_documents(&default_document(), &user, &source).unwrap_err();
    assert!(matches!(err, ConfigError::AwsCredentials { .. }), "{err}");
    assert_eq!(source.calls(), 1);
}

/// Inject looked-up credentials into the config.
#[test]
fn fallback_credentials_are_injected() {
    let source = RecordingCredentials::new(StaticCredentials::new(
        CredentialSet::new("AKIALOCAL", "local-secret").with_output("json"),
    ));
    let user = json!({ "platform": { "name": "demo", "include_aws": true } });
    let config = PlatformConfig::from_documents(&default_document(), &user, &source)
        .expect("config");
    assert_eq!(source.calls(), 1);
    assert_eq!(
        config.typed().expect("typed").aws,
        Some(CredentialSet::new("AKIALOCAL", "local-secret").with_output("json"))
    );
}

/// Keep a supplied aws section without a lookup.
#[test]
fn supplied_aws_section_is_kept() {
    let source = RecordingCredentials::new(StaticCredentials::default());
    let config = PlatformConfig::from_documents(&default_document(), &full_user_document(), &source)
        .expect("config");
    assert_eq!(source.calls(), 0);
    assert_eq!(config.get_str("access_key_id", Some("aws")), Some("AKIAUSER"));
}

/// Sort two independent violations the same way every run.
#[test]
fn two_independent_violations_are_sorted() {
    let default = json!({
        "platform": { "name": "demo", "executor": "local" },
        "docker": {},
        "airflow": { "user": "a" }
    });
    let user = json!({
        "airflow": {
            "accounts": [{
                "username": "u",
                "firstname": "f",
                "lastname": "l",
                "email": "e@example.com",
                "password": "p",
                "role": "Root"
            }]
        }
    });
    let run = || {
        validation_errors(
            PlatformConfig::from_documents(&default, &user, &FailingCredentials).unwrap_err(),
        )
    };
    let errors = run();
    assert_eq!(errors.len(), 2);
    let paths: Vec<_> = errors.iter().map(|error| error.path().to_string()).collect();
    assert_eq!(paths, vec!["docker.image_name", "airflow.accounts[0].role"]);
    assert_eq!(errors.messages(), run().messages());
}

/// N missing required fields in N sections yield N entries.
#[test]
fn validation_is_exhaustive() {
    let document = json!({
        "platform": { "executor": "local" },
        "docker": {},
        "airflow": {},
        "aws": { "access_key_id": "AKIA" }
    });
    let errors = Validator::default().validate(&document).unwrap_err();
    let properties: Vec<_> = errors.iter().map(|error| error.property()).collect();
    assert_eq!(
        properties,
        vec!["image_name", "name", "secret_access_key", "user"]
    );
}

/// Return None rather than failing for missing values.
#[test]
fn accessor_never_fails() {
    let config = PlatformConfig::from_documents(
        &default_document(),
        &json!({ "platform": { "name": "demo" } }),
        &FailingCredentials,
    )
    .expect("config");
    assert_eq!(config.get("missing_section", None), None);
    assert_eq!(config.get("name", Some("missing_section")), None);
    assert_eq!(config.get("missing_key", Some("airflow")), None);
}

/// Keep validation state per parser.
#[test]
fn each_run_has_its_own_state() {
    let mut failing = ConfigParser::new(&json!({}), &json!({}));
    assert!(failing.validate().is_err());
    assert!(!failing.errors().is_empty());

    let fresh = ConfigParser::new(&default_document(), &json!({ "platform": { "name": "demo" } }));
    assert!(!fresh.is_validated());
    assert!(fresh.errors().is_empty());
}

/// Load from files and decode the typed view.
#[test]
fn load_from_files_with_typed_view() {
    let temp = TempDir::new().expect("tmp");
    let default_path = write_document(temp.path(), "default_config.json", &default_document());
    let user_path = write_document(temp.path(), "config.json", &full_user_document());
    let options = ConfigLoadOptions::new(&user_path).with_default_config_path(&default_path);

    let config = PlatformConfig::load_with_source(&options, &FailingCredentials).expect("config");
    let typed = config.typed().expect("typed");
    assert_eq!(typed.platform.executor, Executor::Celery);
    assert_eq!(typed.docker.airflow_submodules, vec!["dags", "plugins"]);
    assert_eq!(typed.airflow.email.map(|email| email.smtp_port), Some(587));
    assert_eq!(typed.airflow.accounts[0].role, AccountRole::Admin);
}

/// Reject a user document whose root is not an object.
#[test]
fn non_object_user_document_is_a_load_error() {
    let temp = TempDir::new().expect("tmp");
    let default_path = write_document(temp.path(), "default_config.json", &default_document());
    let user_path = write_document(temp.path(), "config.json", &Value::from("demo"));
    let options = ConfigLoadOptions::new(&user_path).with_default_config_path(&default_path);
    let err = PlatformConfig::load_with_source(&options, &FailingCredentials).unwrap_err();
    assert!(matches!(err, ConfigError::NotAnObject { .. }), "{err}");
}

/// The bundled defaults plus a platform name form a valid config.
#[test]
fn bundled_defaults_need_only_a_name() {
    let temp = TempDir::new().expect("tmp");
    let user_path = write_document(
        temp.path(),
        "config.json",
        &json!({ "platform": { "name": "demo" } }),
    );
    let mut options = ConfigLoadOptions::new(&user_path);
    options.default_config_path = None;

    let config = PlatformConfig::load_with_source(&options, &FailingCredentials).expect("config");
    assert_eq!(config.get_u64("internal_port", Some("postgres")), Some(5432));
    assert_eq!(config.get_bool("include_aws", Some("platform")), Some(false));
}
