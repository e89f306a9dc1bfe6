//! Field access and truthiness over the JSON view of an item.
//!
//! Items are read through their `serde` representation: mappings expose
//! their keys and structs expose their fields, so a single accessor covers
//! both keyed and attribute access.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Returns the JSON view of `item`.
pub fn to_value<T: Serialize + ?Sized>(item: &T) -> Result<Value> {
    Ok(serde_json::to_value(item)?)
}

/// Reads `key` from the JSON view of `item`.
///
/// Fails with [`Error::MissingKey`] when the item has no such key or is not
/// an object at all.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use synapsis_core::query::field;
///
/// let item = json!({"id": 7, "name": "a"});
/// assert_eq!(field(&item, "id").unwrap(), json!(7));
/// assert!(field(&item, "nope").is_err());
/// ```
pub fn field<T: Serialize + ?Sized>(item: &T, key: &str) -> Result<Value> {
    let view = to_value(item)?;
    field_of(&view, key)
}

/// Reads `key` from an already-serialized item.
pub fn field_of(view: &Value, key: &str) -> Result<Value> {
    match view {
        Value::Object(map) => map
            .get(key)
            .cloned()
            .ok_or_else(|| Error::missing_key(key, view)),
        _ => Err(Error::missing_key(key, view)),
    }
}

/// Compares two JSON values, treating numbers by numeric value.
///
/// `1` and `1.0` are equal here, unlike with `Value`'s own `==`. Arrays
/// and objects compare element by element under the same rule.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use synapsis_core::query::values_equal;
///
/// assert!(values_equal(&json!(2), &json!(2.0)));
/// assert!(values_equal(&json!({"n": [1]}), &json!({"n": [1.0]})));
/// assert!(!values_equal(&json!(2), &json!("2")));
/// ```
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

/// Returns whether a JSON value counts as true.
///
/// `null`, `false`, zero, the empty string, the empty array, and the empty
/// object are false; everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Entity {
        id: String,
        version: u32,
    }

    #[test]
    fn test_field_reads_struct_attribute() {
        let e = Entity {
            id: "syn1".into(),
            version: 2,
        };
        assert_eq!(field(&e, "id").unwrap(), json!("syn1"));
        assert_eq!(field(&e, "version").unwrap(), json!(2));
    }

    #[test]
    fn test_field_reads_map_key() {
        let mut m = BTreeMap::new();
        m.insert("id", 1);
        assert_eq!(field(&m, "id").unwrap(), json!(1));
    }

    #[test]
    fn test_field_missing_key_is_shape_error() {
        let err = field(&json!({"a": 1}), "b").unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_field_on_scalar_is_shape_error() {
        let err = field(&5, "id").unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_field_present_null_is_not_missing() {
        assert_eq!(field(&json!({"a": null}), "a").unwrap(), Value::Null);
    }

    #[test]
    fn test_values_equal_across_number_kinds() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(values_equal(&json!(3.0), &json!(3i64)));
        assert!(values_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!values_equal(&json!(-1), &json!(u64::MAX)));
        assert!(!values_equal(&json!(1), &json!(1.5)));
        assert!(!values_equal(&json!(0), &json!(false)));
        assert!(!values_equal(&json!(null), &json!(0)));
    }

    #[test]
    fn test_values_equal_nested() {
        assert!(values_equal(&json!([1, {"a": 2}]), &json!([1.0, {"a": 2.0}])));
        assert!(!values_equal(&json!([1]), &json!([1, 2])));
        assert!(!values_equal(&json!({"a": 1}), &json!({"b": 1})));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_truthiness() {
        for falsy in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("0"), json!([0]), json!({"a": 0})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
