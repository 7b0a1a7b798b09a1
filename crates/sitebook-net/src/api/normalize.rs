//! Response normalization at the data-access boundary.
//!
//! The backend is inconsistent in two ways that typed records should never
//! see: some collections name the primary key `_id` rather than `id`, and
//! some endpoints wrap their payload in `{"data": ...}`. Both are resolved
//! here, once, before decoding.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sitebook_core::logging::targets;

use crate::error::{ApiError, Result};

const LEGACY_ID: &str = "_id";
const ID: &str = "id";
const ENVELOPE: &str = "data";

/// Rewrite every `_id` key to `id`, recursively.
///
/// When an object carries both and they differ, `id` is kept and the
/// disagreement is logged.
pub fn normalize_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            normalize_object(map);
            for child in map.values_mut() {
                normalize_ids(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_ids(item);
            }
        }
        _ => {}
    }
}

fn normalize_object(map: &mut Map<String, Value>) {
    let Some(legacy) = map.remove(LEGACY_ID) else {
        return;
    };
    let current = map.get(ID).filter(|id| !id.is_null()).cloned();
    match current {
        None => {
            map.insert(ID.to_string(), legacy);
        }
        Some(id) if !same_id(&id, &legacy) => {
            tracing::warn!(
                target: targets::RESOURCES,
                id = %id,
                legacy_id = %legacy,
                "record carries conflicting id and _id; keeping id"
            );
        }
        Some(_) => {}
    }
}

fn same_id(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(a), Value::Number(b)) | (Value::Number(b), Value::String(a)) => {
            *a == b.to_string()
        }
        _ => a == b,
    }
}

/// Strip a `{"data": ...}` envelope.
///
/// An object is treated as an envelope only when it has a `data` key and
/// no id of its own, so a record that happens to have a `data` field is
/// left alone.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.contains_key(ENVELOPE) && !map.contains_key(ID) && !map.contains_key(LEGACY_ID) =>
        {
            map.remove(ENVELOPE).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Unwrap, normalize, and decode a response body into `T`.
pub fn decode<T: DeserializeOwned>(resource: &'static str, value: Value) -> Result<T> {
    let mut value = unwrap_envelope(value);
    normalize_ids(&mut value);
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        resource,
        message: e.to_string(),
    })
}

/// Decode a list response. A `null` body or envelope decodes as empty.
pub fn decode_list<T: DeserializeOwned>(resource: &'static str, value: Value) -> Result<Vec<T>> {
    match unwrap_envelope(value) {
        Value::Null => Ok(Vec::new()),
        other => decode(resource, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_id_becomes_id() {
        let mut value = json!({"_id": "abc", "name": "Cement"});
        normalize_ids(&mut value);
        assert_eq!(value, json!({"id": "abc", "name": "Cement"}));
    }

    #[test]
    fn test_id_wins_on_conflict() {
        let mut value = json!({"_id": "old", "id": "new"});
        normalize_ids(&mut value);
        assert_eq!(value, json!({"id": "new"}));
    }

    #[test]
    fn test_equal_ids_across_types_are_not_a_conflict() {
        assert!(same_id(&json!("7"), &json!(7)));
        assert!(!same_id(&json!("7"), &json!(8)));
    }

    #[test]
    fn test_nested_records_are_normalized() {
        let mut value = json!([{"_id": 1, "lines": [{"_id": 2}]}]);
        normalize_ids(&mut value);
        assert_eq!(value, json!([{"id": 1, "lines": [{"id": 2}]}]));
    }

    #[test]
    fn test_envelope_only_without_id() {
        assert_eq!(unwrap_envelope(json!({"data": [1, 2]})), json!([1, 2]));
        let record = json!({"id": "x", "data": "payload"});
        assert_eq!(unwrap_envelope(record.clone()), record);
    }

    #[test]
    fn test_decode_list_null_is_empty() {
        let items: Vec<Value> = decode_list("item", json!({"data": null})).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_decode_reports_resource() {
        let err = decode::<Vec<u32>>("vendor", json!({"x": 1})).unwrap_err();
        assert!(matches!(err, ApiError::Decode { resource: "vendor", .. }));
    }
}
