use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal default document: everything except `platform.name`.
pub fn default_document() -> Value {
    json!({
        "platform": { "executor": "local" },
        "docker": { "image_name": "x" },
        "airflow": { "user": "a" }
    })
}

/// A user document exercising every section of the schema.
pub fn full_user_document() -> Value {
    json!({
        "platform": {
            "name": "demo",
            "executor": "celery",
            "include_hive": false,
            "include_aws": true,
            "include_examples": true
        },
        "aws": {
            "access_key_id": "AKIAUSER",
            "secret_access_key": "user-secret",
            "region": "eu-west-1",
            "output": "json"
        },
        "postgres": {
            "user": "airflow",
            "password": "airflow",
            "db": "airflow",
            "internal_port": 5432,
            "external_port": 5433
        },
        "docker": {
            "image_name": "pollinator/airflow",
            "load_pipfile": true,
            "load_requirements": false,
            "airflow_home": "/usr/local/airflow",
            "airflow_submodules": ["dags", "plugins"]
        },
        "airflow": {
            "user": "airflow",
            "webserver_port": 8080,
            "webserver_internal_port": 8080,
            "webserver_external_port": 8081,
            "authentication": true,
            "email": {
                "email_address": "alerts@example.com",
                "password": "smtp-secret",
                "smtp_host": "smtp.example.com",
                "smtp_port": 587
            },
            "accounts": [{
                "username": "admin",
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": "ada@example.com",
                "password": "admin",
                "role": "Admin"
            }]
        }
    })
}

/// Write a document as pretty JSON and return its path.
pub fn write_document(dir: &Path, name: &str, document: &Value) -> PathBuf {
    let path = dir.join(name);
    let contents = serde_json::to_string_pretty(document).expect("serialize document");
    fs::write(&path, contents).expect("write document");
    path
}
