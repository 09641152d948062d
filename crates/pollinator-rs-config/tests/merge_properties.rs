//! Property tests for merging and validation over generated documents.

use pollinator_rs_config::{Validator, merge_documents};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Keys drawn from a small pool so default and user documents overlap, mixed
/// with the schema's own section and property names.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c]{1,2}",
        prop::sample::select(vec![
            "platform",
            "docker",
            "airflow",
            "aws",
            "postgres",
            "name",
            "executor",
            "include_aws",
            "image_name",
            "user",
            "accounts",
            "role",
        ])
        .prop_map(str::to_string),
    ]
}

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        "[a-z]{0,6}".prop_map(Value::String),
        Just(Value::String("local".to_string())),
    ];

    leaf.prop_recursive(max_depth, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..5)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn document_strategy() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(key_strategy(), json_value_strategy(3), 0..6)
        .prop_map(|map| Value::Object(map.into_iter().collect::<Map<_, _>>()))
}

/// Every non-object value with its key path from the root.
fn leaves(value: &Value) -> Vec<(Vec<String>, Value)> {
    fn walk(value: &Value, path: &mut Vec<String>, out: &mut Vec<(Vec<String>, Value)>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    path.push(key.clone());
                    walk(child, path, out);
                    path.pop();
                }
            }
            other => out.push((path.clone(), other.clone())),
        }
    }
    let mut out = Vec::new();
    walk(value, &mut Vec::new(), &mut out);
    out
}

fn lookup<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(key))
}

/// Whether the user document leaves `path` to the defaults: walking the path
/// through it reaches a missing key before any non-object value.
fn only_in_default(user: &Value, path: &[String]) -> bool {
    let mut node = user;
    for key in path {
        match node.as_object() {
            Some(map) => match map.get(key) {
                Some(child) => node = child,
                None => return true,
            },
            None => return false,
        }
    }
    false
}

proptest! {
    /// Every leaf of the user document survives the merge unchanged.
    #[test]
    fn merge_keeps_every_user_leaf(default in document_strategy(), user in document_strategy()) {
        let merged = merge_documents(&default, &user);
        for (path, value) in leaves(&user) {
            prop_assert_eq!(lookup(&merged, &path), Some(&value), "path {:?}", path);
        }
    }

    /// Anything the user document does not touch keeps its default value.
    #[test]
    fn merge_keeps_untouched_defaults(default in document_strategy(), user in document_strategy()) {
        let merged = merge_documents(&default, &user);
        for (path, value) in leaves(&default) {
            if only_in_default(&user, &path) {
                prop_assert_eq!(lookup(&merged, &path), Some(&value), "path {:?}", path);
            }
        }
    }

    /// Validating the same document twice yields the same report.
    #[test]
    fn validation_is_deterministic(default in document_strategy(), user in document_strategy()) {
        let merged = merge_documents(&default, &user);
        let validator = Validator::default();
        let first = validator.validate(&merged).err().map(|errors| errors.messages());
        let second = validator.validate(&merged).err().map(|errors| errors.messages());
        prop_assert_eq!(first, second);
    }
}
