//! JSON merge helpers for the default and user config documents.

use serde_json::Value;

/// Merge the user document over the default document.
///
/// Objects merge key by key; every other value, arrays included, is replaced
/// wholesale by the user's value. Neither input is modified.
pub fn merge_documents(default: &Value, user: &Value) -> Value {
    let mut merged = default.clone();
    merge_json_values(&mut merged, user);
    merged
}

/// Merge overlay values into the base, recursively overriding objects.
fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}
