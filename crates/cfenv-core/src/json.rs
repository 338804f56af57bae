//! Typed accessors over decoded JSON documents.
//!
//! The platform documents are decoded into [`serde_json::Value`] trees. These
//! helpers read a field with the expected type and return `None` for anything
//! else, so callers never assume a shape they have not checked.

use serde_json::{Map, Value};

/// Read a string field.
pub fn str_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// Read an owned string field.
pub fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    str_field(object, key).map(str::to_string)
}

/// Read an integer field.
///
/// Floats with no fractional part are accepted, matching what a JSON number
/// like `128.0` means to a human.
pub fn i64_field(object: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = object.get(key)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Read an object field.
pub fn object_field<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    object.get(key).and_then(Value::as_object)
}

/// Read an array of strings, dropping entries that are not strings.
///
/// Returns `None` when the field is absent or not an array.
pub fn string_array_field(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let array = object.get(key)?.as_array()?;
    Some(
        array
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_str_field_rejects_other_types() {
        let obj = object(json!({"a": "x", "b": 1}));
        assert_eq!(str_field(&obj, "a"), Some("x"));
        assert_eq!(str_field(&obj, "b"), None);
        assert_eq!(str_field(&obj, "missing"), None);
    }

    #[test]
    fn test_i64_field_accepts_whole_floats() {
        let obj = object(json!({"int": 128, "float": 1024.0, "frac": 1.5, "str": "16"}));
        assert_eq!(i64_field(&obj, "int"), Some(128));
        assert_eq!(i64_field(&obj, "float"), Some(1024));
        assert_eq!(i64_field(&obj, "frac"), None);
        assert_eq!(i64_field(&obj, "str"), None);
    }

    #[test]
    fn test_string_array_field_drops_non_strings() {
        let obj = object(json!({"tags": ["a", 1, "b", null], "scalar": "a"}));
        assert_eq!(
            string_array_field(&obj, "tags"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(string_array_field(&obj, "scalar"), None);
    }
}
